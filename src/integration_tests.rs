#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use crate::app_system::AdminSystem;
    use crate::controller::LoadState;
    use crate::domain::{OrderStatus, Role};
    use crate::error::ApiError;
    use crate::http::{Filters, ListQuery, Method};
    use crate::mock_framework::{admin_session, create_mock_api, expect_call, expect_request};
    use crate::pages::{self, fees, orders};
    use crate::services::{FeeRowAction, OrderRowAction};
    use crate::session::Session;

    fn fee(id: &str, active: bool) -> Value {
        json!({"_id": id, "level": "GLOBAL", "feeType": "PERCENTAGE", "feeValue": 5, "isActive": active})
    }

    fn order(id: &str, number: &str, status: &str) -> Value {
        json!({"_id": id, "orderNumber": number, "status": status, "totalAmount": 40})
    }

    #[tokio::test]
    async fn toggle_refetches_and_shows_the_new_value() {
        let (api, mut backend) = create_mock_api(admin_session(), 8);
        let mut system = AdminSystem::new(api);
        let source = system.fees.clone();
        let handle = system.open_list(source, ListQuery::default());

        expect_call(&mut backend, Method::Get, "/api/admin/fees")
            .await
            .respond(200, json!({"success": true, "fees": [fee("f1", true)]}));
        assert!(handle.settled().await.unwrap().items[0].is_active);

        let toggle = {
            let handle = handle.clone();
            tokio::spawn(async move { handle.run_action(FeeRowAction::Toggle("f1".into())).await })
        };
        expect_call(&mut backend, Method::Patch, "/api/admin/fees/f1/toggle")
            .await
            .respond(200, json!({"success": true, "message": "Fee toggled"}));
        expect_call(&mut backend, Method::Get, "/api/admin/fees")
            .await
            .respond(200, json!({"fees": [fee("f1", false)]}));

        assert_eq!(toggle.await.unwrap(), Ok(()));
        let state = handle.settled().await.unwrap();
        assert!(!state.items[0].is_active);
        assert_eq!(state.action_error, None);

        let page = pages::render_list_page("Platform fees", &fees::fee_filters(), &fees::fee_table(), &state);
        assert!(page.contains("| No "));

        drop(handle);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn partial_echoes_do_not_fail_row_actions() {
        let (api, mut backend) = create_mock_api(admin_session(), 8);
        let mut system = AdminSystem::new(api);
        let fee_source = system.fees.clone();
        let order_source = system.orders.clone();
        let fee_page = system.open_list(fee_source, ListQuery::default());
        let order_page = system.open_list(order_source, ListQuery::default());

        for _ in 0..2 {
            let list = expect_request(&mut backend).await.unwrap();
            if list.is(Method::Get, "/api/admin/fees") {
                list.respond(200, json!({"fees": [fee("f1", true)]}));
            } else {
                list.respond(200, json!({"orders": [order("o1", "ORD-1", "PENDING")]}));
            }
        }
        fee_page.settled().await.unwrap();
        order_page.settled().await.unwrap();

        let toggle = {
            let handle = fee_page.clone();
            tokio::spawn(async move { handle.run_action(FeeRowAction::Toggle("f1".into())).await })
        };
        expect_call(&mut backend, Method::Patch, "/api/admin/fees/f1/toggle").await.respond(
            200,
            json!({"success": true, "message": "Fee deactivated", "data": {"_id": "f1", "isActive": false}}),
        );
        expect_call(&mut backend, Method::Get, "/api/admin/fees")
            .await
            .respond(200, json!({"fees": [fee("f1", false)]}));
        assert_eq!(toggle.await.unwrap(), Ok(()));
        assert_eq!(fee_page.settled().await.unwrap().action_error, None);

        let cancel = {
            let handle = order_page.clone();
            tokio::spawn(async move { handle.run_action(OrderRowAction::Cancel { id: "o1".into(), reason: None }).await })
        };
        expect_call(&mut backend, Method::Post, "/api/admin-orders/o1/cancel")
            .await
            .respond(200, json!({"success": true, "data": {"orderId": "o1", "status": "CANCELLED"}}));
        expect_call(&mut backend, Method::Get, "/api/admin-orders")
            .await
            .respond(200, json!({"orders": [order("o1", "ORD-1", "CANCELLED")]}));
        assert_eq!(cancel.await.unwrap(), Ok(()));
        let state = order_page.settled().await.unwrap();
        assert_eq!(state.action_error, None);
        assert_eq!(state.items[0].status, OrderStatus::Cancelled);
    }

    #[tokio::test]
    async fn failed_toggle_keeps_server_state_and_reports_error() {
        let (api, mut backend) = create_mock_api(admin_session(), 8);
        let mut system = AdminSystem::new(api);
        let source = system.fees.clone();
        let handle = system.open_list(source, ListQuery::default());

        expect_call(&mut backend, Method::Get, "/api/admin/fees")
            .await
            .respond(200, json!({"fees": [fee("f1", true)]}));
        handle.settled().await.unwrap();

        let toggle = {
            let handle = handle.clone();
            tokio::spawn(async move { handle.run_action(FeeRowAction::Toggle("f1".into())).await })
        };
        expect_call(&mut backend, Method::Patch, "/api/admin/fees/f1/toggle")
            .await
            .respond(409, json!({"success": false, "message": "Global fee cannot be disabled"}));
        expect_call(&mut backend, Method::Get, "/api/admin/fees")
            .await
            .respond(200, json!({"fees": [fee("f1", true)]}));

        let err = toggle.await.unwrap().unwrap_err();
        assert_eq!(err.to_string(), "Global fee cannot be disabled");
        let state = handle.settled().await.unwrap();
        assert!(state.items[0].is_active);
        assert_eq!(state.action_error.as_deref(), Some("Global fee cannot be disabled"));
    }

    #[tokio::test]
    async fn stale_fetch_is_discarded() {
        let (api, mut backend) = create_mock_api(admin_session(), 8);
        let mut system = AdminSystem::new(api);
        let source = system.orders.clone();
        let handle = system.open_list(source, ListQuery::default());

        let first = expect_call(&mut backend, Method::Get, "/api/admin-orders").await;
        let generation = handle.set_filter("status", "SHIPPED").await.unwrap();
        assert_eq!(generation, 2);
        let second = expect_call(&mut backend, Method::Get, "/api/admin-orders").await;
        assert_eq!(second.request.query, "page=1&limit=20&status=SHIPPED");

        first.respond(200, json!({"orders": [order("o1", "ORD-1", "PENDING")]}));
        second.respond(200, json!({"orders": [order("o2", "ORD-2", "SHIPPED")]}));

        let state = handle.settled().await.unwrap();
        assert_eq!(state.generation, 2);
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].id, "o2");
        assert_eq!(state.filters.get("status"), Some("SHIPPED"));
    }

    #[tokio::test]
    async fn filter_change_returns_to_first_page() {
        let (api, mut backend) = create_mock_api(admin_session(), 8);
        let mut system = AdminSystem::new(api);
        let source = system.orders.clone();
        let handle = system.open_list(source, ListQuery::new(3, 20).with_filters(Filters::new().with("search", "ada")));

        let list = expect_call(&mut backend, Method::Get, "/api/admin-orders").await;
        assert_eq!(list.request.query, "page=3&limit=20&search=ada");
        list.respond(
            200,
            json!({"data": [order("o1", "ORD-1", "PENDING")],
                   "pagination": {"currentPage": 3, "totalPages": 4, "hasNextPage": true, "hasPrevPage": true}}),
        );
        assert_eq!(handle.settled().await.unwrap().pagination.current_page, 3);

        handle.set_filter("status", OrderStatus::Delivered.as_str()).await.unwrap();
        let list = expect_call(&mut backend, Method::Get, "/api/admin-orders").await;
        assert_eq!(list.request.query, "page=1&limit=20&search=ada&status=DELIVERED");
        list.respond(200, json!({"data": [], "pagination": {"currentPage": 1, "totalPages": 1}}));

        let state = handle.settled().await.unwrap();
        assert_eq!(state.pagination.current_page, 1);
        assert!(state.items.is_empty());
        let page = pages::render_list_page("Orders", &orders::order_filters(), &orders::order_table(), &state);
        assert!(page.contains("No orders found"));
    }

    #[tokio::test]
    async fn missing_pagination_keeps_defaults() {
        let (api, mut backend) = create_mock_api(admin_session(), 8);
        let mut system = AdminSystem::new(api);
        let source = system.orders.clone();
        let handle = system.open_list(source, ListQuery::default());

        expect_call(&mut backend, Method::Get, "/api/admin-orders")
            .await
            .respond(200, json!([order("o1", "ORD-1", "PENDING"), order("o2", "ORD-2", "PAID")]));

        let state = handle.settled().await.unwrap();
        assert_eq!(state.load, LoadState::Success);
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.pagination.current_page, 1);
        assert_eq!(state.pagination.total_pages, 1);
        assert!(!state.pagination.has_next_page);
        assert!(!state.pagination.has_prev_page);
    }

    #[tokio::test]
    async fn list_envelopes_decode_alike() {
        let bodies = [
            json!({"data": [order("o1", "ORD-1", "PENDING")], "pagination": {"totalPages": 1}}),
            json!({"results": [order("o1", "ORD-1", "PENDING")]}),
            json!([order("o1", "ORD-1", "PENDING")]),
        ];
        for body in bodies {
            let (api, mut backend) = create_mock_api(admin_session(), 4);
            let system = AdminSystem::new(api);
            let call = tokio::spawn(async move { system.orders.list_orders(&ListQuery::default()).await });
            expect_call(&mut backend, Method::Get, "/api/admin-orders").await.respond(200, body);

            let page = call.await.unwrap().unwrap();
            assert_eq!(page.items.len(), 1);
            assert_eq!(page.items[0].reference(), "ORD-1");
        }
    }

    #[tokio::test]
    async fn cancel_on_missing_order_surfaces_server_message() {
        let (api, mut backend) = create_mock_api(admin_session(), 8);
        let mut system = AdminSystem::new(api);
        let source = system.orders.clone();
        let handle = system.open_list(source, ListQuery::default());
        expect_call(&mut backend, Method::Get, "/api/admin-orders")
            .await
            .respond(200, json!({"orders": []}));
        handle.settled().await.unwrap();

        let cancel = {
            let handle = handle.clone();
            tokio::spawn(async move {
                handle
                    .run_action(OrderRowAction::Cancel { id: "missing".into(), reason: Some("duplicate".into()) })
                    .await
            })
        };
        let exchange = expect_call(&mut backend, Method::Post, "/api/admin-orders/missing/cancel").await;
        assert_eq!(exchange.request.body, Some(json!({"reason": "duplicate"})));
        exchange.respond(404, json!({"message": "Order not found"}));
        expect_call(&mut backend, Method::Get, "/api/admin-orders")
            .await
            .respond(200, json!({"orders": []}));

        let err = cancel.await.unwrap().unwrap_err();
        assert_eq!(err, ApiError::Server { status: 404, message: "Order not found".into() });
        let state = handle.settled().await.unwrap();
        let page = pages::render_list_page("Orders", &orders::order_filters(), &orders::order_table(), &state);
        assert!(page.contains("! Order not found"));
    }

    #[tokio::test]
    async fn non_admin_session_never_reaches_the_backend() {
        let (api, mut backend) = create_mock_api(Session::new("vendor_token", Role::Vendor), 4);
        let mut system = AdminSystem::new(api);
        let source = system.vendors.clone();
        let handle = system.open_list(source, ListQuery::default());

        let state = handle.settled().await.unwrap();
        assert_eq!(state.load, LoadState::Error);
        assert_eq!(state.error.as_deref(), Some("Admin access required (current role: VENDOR)"));

        drop(handle);
        system.shutdown().await.unwrap();
        assert!(expect_request(&mut backend).await.is_none());
    }
}
