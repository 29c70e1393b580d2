pub mod athlete;
pub mod athlete_score;
pub mod bout;
pub mod follow;
pub mod gym;
pub mod outcome;
pub mod record;
pub mod style;

pub use athlete::Athlete;
pub use athlete_score::AthleteScore;
pub use bout::{Bout, BoutState};
pub use follow::Follow;
pub use gym::Gym;
pub use outcome::Outcome;
pub use record::Record;
pub use style::Style;
