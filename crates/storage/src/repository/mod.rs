pub mod athlete;
pub mod bout;
pub mod feed;
pub mod gym;
pub mod outcome;
pub mod record;
pub mod score;
pub mod style;
