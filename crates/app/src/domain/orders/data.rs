//! Orders Data

use crate::domain::orders::records::OrderUuid;

/// Order placement request. The caller picks the uuid so a retried request
/// cannot place the same order twice.
#[derive(Debug, Clone, Copy)]
pub struct NewOrder {
    pub uuid: OrderUuid,
}
