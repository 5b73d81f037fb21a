pub mod classification;
pub mod criteria;
pub mod event_date;
pub mod history;
pub mod location;
pub mod observation;
pub mod profile;
