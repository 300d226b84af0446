//! Customer identification middleware.
//!
//! Shoppers are authenticated upstream; the gateway forwards the customer's
//! UUID in the `X-Customer-Uuid` header.

use salvo::prelude::*;
use uuid::Uuid;

use flashsale_app::domain::carts::records::CustomerUuid;

use crate::extensions::*;

pub(crate) const CUSTOMER_HEADER: &str = "x-customer-uuid";

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(customer) = extract_customer(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid X-Customer-Uuid header"));

        return;
    };

    depot.insert_customer_uuid(customer);

    ctrl.call_next(req, depot, res).await;
}

fn extract_customer(req: &Request) -> Option<CustomerUuid> {
    let value = req.headers().get(CUSTOMER_HEADER)?.to_str().ok()?;

    Uuid::parse_str(value.trim())
        .ok()
        .filter(|uuid| !uuid.is_nil())
        .map(CustomerUuid::from_uuid)
}
