//! Release Price Lock Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{errors::into_api_error, get::CartLineResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Release Price Lock Handler
///
/// Drops a line's flash-sale lock; the line is priced from the catalog again.
#[endpoint(
    tags("cart"),
    summary = "Release Price Lock",
    responses(
        (status_code = StatusCode::OK, description = "Lock released"),
        (status_code = StatusCode::NOT_FOUND, description = "Line not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartLineResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let line = state
        .app
        .carts
        .release_lock(customer, product.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Json(line.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use flashsale_app::domain::{carts::records::PriceLock, products::records::ProductUuid};

    use crate::{
        carts::tests::make_line,
        test_helpers::{Mocks, TEST_CUSTOMER_UUID},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.into_service(Router::with_path("cart/items/{product}/lock").delete(handler))
    }

    #[tokio::test]
    async fn test_release_lock_returns_unlocked_line() -> TestResult {
        let product = ProductUuid::new();
        let line = make_line(product, 1, PriceLock::Unlocked);

        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_release_lock()
            .once()
            .withf(move |customer, p| *customer == TEST_CUSTOMER_UUID && *p == product)
            .return_once(move |_, _| Ok(line));

        let mut res = TestClient::delete(format!("http://example.com/cart/items/{product}/lock"))
            .send(&make_service(mocks))
            .await;

        let body: CartLineResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.offer_uuid, None);
        assert_eq!(body.locked_price, None);

        Ok(())
    }
}
