use crate::domain::ports::{Notifier, SheetStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct EndpointState {
    pub sheet: Arc<dyn SheetStore>,
    pub notifier: Arc<dyn Notifier>,
}

impl EndpointState {
    pub fn new(sheet: Arc<dyn SheetStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { sheet, notifier }
    }
}
