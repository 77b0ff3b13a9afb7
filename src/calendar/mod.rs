pub mod agenda;
pub mod feed;
pub mod ical;
