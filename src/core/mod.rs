pub mod aggregator;
pub mod controller;
pub mod validator;

pub use crate::domain::model::{Field, FormState, IntakeRecord};
pub use crate::domain::ports::{Notifier, Presenter, SheetStore, Transport};
pub use crate::utils::error::Result;
