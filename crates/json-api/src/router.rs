//! App Router

use salvo::Router;

use crate::{campaigns, carts, customer, orders, prices, products};

/// Administrative routes: catalog and flash-sale campaigns.
fn admin_router() -> Router {
    Router::new()
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(
            Router::with_path("campaigns")
                .get(campaigns::index::handler)
                .post(campaigns::create::handler)
                .push(
                    Router::with_path("{campaign}")
                        .get(campaigns::get::handler)
                        .put(campaigns::update::handler)
                        .delete(campaigns::delete::handler)
                        .push(Router::with_path("toggle").post(campaigns::toggle::handler))
                        .push(Router::with_path("report").get(campaigns::report::handler))
                        .push(
                            Router::with_path("offers")
                                .get(campaigns::offers::index::handler)
                                .post(campaigns::offers::create::handler)
                                .push(
                                    Router::with_path("{offer}")
                                        .put(campaigns::offers::update::handler)
                                        .delete(campaigns::offers::delete::handler),
                                ),
                        ),
                ),
        )
}

/// Storefront routes. Cart and order routes act for the customer named by
/// the upstream gateway.
fn storefront_router() -> Router {
    Router::new()
        .push(Router::with_path("prices").get(prices::index::handler))
        .push(
            Router::new()
                .hoop(customer::handler)
                .push(
                    Router::with_path("cart")
                        .get(carts::get::handler)
                        .push(
                            Router::with_path("items")
                                .post(carts::items::create::handler)
                                .push(
                                    Router::with_path("{product}")
                                        .put(carts::items::update::handler)
                                        .delete(carts::items::delete::handler)
                                        .push(
                                            Router::with_path("lock")
                                                .delete(carts::items::unlock::handler),
                                        ),
                                ),
                        ),
                )
                .push(
                    Router::with_path("orders")
                        .post(orders::create::handler)
                        .push(Router::with_path("{order}").get(orders::get::handler)),
                ),
        )
}

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(admin_router())
        .push(storefront_router())
}

#[cfg(test)]
mod tests {
    use salvo::{prelude::*, test::TestClient};
    use testresult::TestResult;

    use crate::test_helpers::Mocks;

    use super::*;

    fn make_service() -> Service {
        Service::new(
            Router::new()
                .hoop(salvo::affix_state::inject(Mocks::default().into_state()))
                .push(app_router()),
        )
    }

    #[tokio::test]
    async fn cart_routes_require_a_customer() -> TestResult {
        let res = TestClient::get("http://example.com/cart")
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn order_routes_require_a_customer() -> TestResult {
        let res = TestClient::post("http://example.com/orders")
            .json(&serde_json::json!({ "uuid": uuid::Uuid::now_v7() }))
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_routes_return_404() -> TestResult {
        let res = TestClient::get("http://example.com/coupons")
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
