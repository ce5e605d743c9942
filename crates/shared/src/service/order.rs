use crate::{
    abstract_trait::{
        DynDeliveryAgentQueryRepository, DynOrderCommandRepository, DynOrderQueryRepository,
        OrderCommandServiceTrait, OrderQueryServiceTrait,
    },
    domain::{
        requests::{
            AssignDeliveryRequest, FindAllOrders, UpdateDeliveryStatusRequest,
            UpdateOrderStatusRequest,
        },
        responses::{
            ApiResponse, ApiResponsePagination, OrderResponse, OrderStatusHistoryResponse,
            Pagination,
        },
    },
    errors::ServiceError,
    model::{DeliveryStatus, Order, OrderStatus},
};
use async_trait::async_trait;
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

fn parse_status(order: &Order) -> Result<OrderStatus, ServiceError> {
    OrderStatus::from_str(&order.status).map_err(ServiceError::Internal)
}

pub struct OrderQueryService {
    query: DynOrderQueryRepository,
}

impl OrderQueryService {
    pub fn new(query: DynOrderQueryRepository) -> Self {
        Self { query }
    }

    async fn with_items(&self, order: Order) -> Result<OrderResponse, ServiceError> {
        let items = self.query.find_items(order.order_id).await?;
        Ok(OrderResponse::from_order(order, items))
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError> {
        let (orders, total) = self.query.find_all(req).await?;

        let data: Vec<OrderResponse> = orders.into_iter().map(Into::into).collect();

        Ok(ApiResponsePagination::success(
            "Orders retrieved",
            data,
            Pagination::new(req.page, req.page_size, total),
        ))
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError> {
        let (orders, total) = self.query.find_by_user(user_id, req).await?;

        let data: Vec<OrderResponse> = orders.into_iter().map(Into::into).collect();

        Ok(ApiResponsePagination::success(
            "Orders retrieved",
            data,
            Pagination::new(req.page, req.page_size, total),
        ))
    }

    async fn find_by_id(
        &self,
        order_id: Uuid,
        requester: Uuid,
        is_admin: bool,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let order = self
            .query
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("order {order_id} not found")))?;

        // Customers may only read their own orders.
        if !is_admin && order.user_id != requester {
            return Err(ServiceError::Forbidden(
                "order belongs to another user".to_string(),
            ));
        }

        let response = self.with_items(order).await?;
        Ok(ApiResponse::success("Order retrieved", response))
    }

    async fn find_by_gateway_order_id(
        &self,
        gateway_order_id: &str,
        requester: Uuid,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        // 404 until payment verification has materialized the order; clients
        // poll this endpoint after handing off to the gateway.
        let order = self
            .query
            .find_by_gateway_order_id(gateway_order_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "no order for gateway order {gateway_order_id}"
                ))
            })?;

        if order.user_id != requester {
            return Err(ServiceError::Forbidden(
                "order belongs to another user".to_string(),
            ));
        }

        let response = self.with_items(order).await?;
        Ok(ApiResponse::success("Order retrieved", response))
    }

    async fn find_history(
        &self,
        order_id: Uuid,
        requester: Uuid,
        is_admin: bool,
    ) -> Result<ApiResponse<Vec<OrderStatusHistoryResponse>>, ServiceError> {
        let order = self
            .query
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("order {order_id} not found")))?;

        if !is_admin && order.user_id != requester {
            return Err(ServiceError::Forbidden(
                "order belongs to another user".to_string(),
            ));
        }

        let history = self.query.find_history(order_id).await?;
        let data: Vec<OrderStatusHistoryResponse> = history.into_iter().map(Into::into).collect();

        Ok(ApiResponse::success("Order history retrieved", data))
    }
}

pub struct OrderCommandService {
    query: DynOrderQueryRepository,
    command: DynOrderCommandRepository,
    agent_query: DynDeliveryAgentQueryRepository,
}

impl OrderCommandService {
    pub fn new(
        query: DynOrderQueryRepository,
        command: DynOrderCommandRepository,
        agent_query: DynDeliveryAgentQueryRepository,
    ) -> Self {
        Self {
            query,
            command,
            agent_query,
        }
    }

    async fn load(&self, order_id: Uuid) -> Result<Order, ServiceError> {
        self.query
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("order {order_id} not found")))
    }
}

#[async_trait]
impl OrderCommandServiceTrait for OrderCommandService {
    async fn update_status(
        &self,
        order_id: Uuid,
        req: &UpdateOrderStatusRequest,
        changed_by: Uuid,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let order = self.load(order_id).await?;
        let current = parse_status(&order)?;

        if !current.can_transition_to(req.status) {
            return Err(ServiceError::StateConflict(format!(
                "cannot move order from {} to {}",
                current, req.status
            )));
        }

        let updated = self
            .command
            .update_status(
                order_id,
                current,
                req.status,
                req.notes.as_deref(),
                Some(changed_by),
            )
            .await?;

        info!("🔄 Order {} is now {}", updated.order_number, updated.status);

        let items = self.query.find_items(order_id).await?;
        Ok(ApiResponse::success(
            "Order status updated",
            OrderResponse::from_order(updated, items),
        ))
    }

    async fn assign_delivery(
        &self,
        order_id: Uuid,
        req: &AssignDeliveryRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let order = self.load(order_id).await?;
        let current = parse_status(&order)?;

        // Only a parcel that is ready to leave can be handed to an agent.
        if !matches!(current, OrderStatus::Packed | OrderStatus::Shipped) {
            return Err(ServiceError::StateConflict(format!(
                "order in status {current} cannot be assigned for delivery"
            )));
        }

        let agent = self
            .agent_query
            .find_by_id(req.delivery_agent_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("delivery agent {} not found", req.delivery_agent_id))
            })?;

        if !agent.is_active {
            return Err(ServiceError::StateConflict(
                "delivery agent is not active".to_string(),
            ));
        }

        if self
            .agent_query
            .has_active_assignment(req.delivery_agent_id)
            .await?
        {
            return Err(ServiceError::StateConflict(
                "delivery agent already has an active order".to_string(),
            ));
        }

        let updated = self
            .command
            .assign_delivery(order_id, req.delivery_agent_id)
            .await?;

        info!(
            "🚚 Order {} assigned to agent {}",
            updated.order_number, agent.name
        );

        let items = self.query.find_items(order_id).await?;
        Ok(ApiResponse::success(
            "Delivery agent assigned",
            OrderResponse::from_order(updated, items),
        ))
    }

    async fn update_delivery_status(
        &self,
        order_id: Uuid,
        req: &UpdateDeliveryStatusRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let order = self.load(order_id).await?;

        let current_raw = order.delivery_status.as_deref().ok_or_else(|| {
            ServiceError::StateConflict("order has no delivery assignment".to_string())
        })?;
        let current = DeliveryStatus::from_str(current_raw).map_err(ServiceError::Internal)?;

        if !current.can_transition_to(req.delivery_status) {
            return Err(ServiceError::StateConflict(format!(
                "cannot move delivery from {} to {}",
                current, req.delivery_status
            )));
        }

        // A courier report may only close an order the lifecycle has brought
        // to the doorstep; it is not a shortcut past the packing stages.
        if req.delivery_status == DeliveryStatus::Delivered {
            let order_status = parse_status(&order)?;
            if order_status != OrderStatus::Delivered
                && !order_status.can_transition_to(OrderStatus::Delivered)
            {
                return Err(ServiceError::StateConflict(format!(
                    "order in status {order_status} cannot be marked delivered"
                )));
            }
        }

        let updated = self
            .command
            .update_delivery_status(order_id, current, req.delivery_status)
            .await?;

        let items = self.query.find_items(order_id).await?;
        Ok(ApiResponse::success(
            "Delivery status updated",
            OrderResponse::from_order(updated, items),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::{
            DeliveryAgentQueryRepositoryTrait, NewOrder, OrderCommandRepositoryTrait,
            OrderQueryRepositoryTrait,
        },
        errors::RepositoryError,
        model::{DeliveryAgent, OrderItem, OrderStatusHistory},
    };
    use chrono::Utc;
    use std::sync::{Arc, Mutex};

    /// One order held behind both repository seams, with repo-like guarded
    /// writes so the service sees the same semantics as against Postgres.
    struct FakeOrderStore {
        order: Mutex<Order>,
        history: Mutex<Vec<OrderStatusHistory>>,
    }

    impl FakeOrderStore {
        fn new(order: Order) -> Self {
            Self {
                order: Mutex::new(order),
                history: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl OrderQueryRepositoryTrait for FakeOrderStore {
        async fn find_all(
            &self,
            _req: &FindAllOrders,
        ) -> Result<(Vec<Order>, i64), RepositoryError> {
            unimplemented!("not exercised")
        }

        async fn find_by_user(
            &self,
            _user_id: Uuid,
            _req: &FindAllOrders,
        ) -> Result<(Vec<Order>, i64), RepositoryError> {
            unimplemented!("not exercised")
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, RepositoryError> {
            let order = self.order.lock().unwrap().clone();
            Ok(Some(order).filter(|o| o.order_id == id))
        }

        async fn find_by_gateway_order_id(
            &self,
            _gateway_order_id: &str,
        ) -> Result<Option<Order>, RepositoryError> {
            unimplemented!("not exercised")
        }

        async fn find_items(&self, _order_id: Uuid) -> Result<Vec<OrderItem>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn find_history(
            &self,
            order_id: Uuid,
        ) -> Result<Vec<OrderStatusHistory>, RepositoryError> {
            Ok(self
                .history
                .lock()
                .unwrap()
                .iter()
                .filter(|h| h.order_id == order_id)
                .cloned()
                .collect())
        }
    }

    #[async_trait]
    impl OrderCommandRepositoryTrait for FakeOrderStore {
        async fn create_order(&self, _order: &NewOrder) -> Result<Order, RepositoryError> {
            unimplemented!("not exercised")
        }

        async fn update_status(
            &self,
            _order_id: Uuid,
            from: OrderStatus,
            to: OrderStatus,
            _notes: Option<&str>,
            _changed_by: Option<Uuid>,
        ) -> Result<Order, RepositoryError> {
            let mut order = self.order.lock().unwrap();
            if order.status != from.as_str() {
                return Err(RepositoryError::Conflict(format!(
                    "order is no longer in status {from}"
                )));
            }
            order.status = to.as_str().to_string();
            Ok(order.clone())
        }

        async fn assign_delivery(
            &self,
            _order_id: Uuid,
            _agent_id: Uuid,
        ) -> Result<Order, RepositoryError> {
            unimplemented!("not exercised")
        }

        async fn update_delivery_status(
            &self,
            _order_id: Uuid,
            from: DeliveryStatus,
            to: DeliveryStatus,
        ) -> Result<Order, RepositoryError> {
            let mut order = self.order.lock().unwrap();
            if order.delivery_status.as_deref() != Some(from.as_str()) {
                return Err(RepositoryError::Conflict(format!(
                    "delivery is no longer in status {from}"
                )));
            }
            order.delivery_status = Some(to.as_str().to_string());
            if to == DeliveryStatus::Delivered
                && order.status == OrderStatus::OutForDelivery.as_str()
            {
                order.status = OrderStatus::Delivered.as_str().to_string();
            }
            Ok(order.clone())
        }
    }

    struct NoAgents;

    #[async_trait]
    impl DeliveryAgentQueryRepositoryTrait for NoAgents {
        async fn find_all(
            &self,
            _req: &crate::domain::requests::FindAllAgents,
        ) -> Result<(Vec<DeliveryAgent>, i64), RepositoryError> {
            unimplemented!("not exercised")
        }

        async fn find_by_id(&self, _id: Uuid) -> Result<Option<DeliveryAgent>, RepositoryError> {
            unimplemented!("not exercised")
        }

        async fn has_active_assignment(&self, _agent_id: Uuid) -> Result<bool, RepositoryError> {
            unimplemented!("not exercised")
        }
    }

    fn order(status: OrderStatus, delivery_status: Option<DeliveryStatus>) -> Order {
        Order {
            order_id: Uuid::new_v4(),
            order_number: "ORD-TEST000001".into(),
            user_id: Uuid::new_v4(),
            customer_name: "Asha Nair".into(),
            customer_phone: "9876543210".into(),
            customer_email: None,
            shipping_address: "14 Marine Drive, Kochi, Kerala".into(),
            pincode: "682001".into(),
            subtotal: 249_900,
            discount: 0,
            coupon_code: None,
            total: 249_900,
            payment_method: "cod".into(),
            payment_status: "pending".into(),
            gateway_order_id: None,
            gateway_payment_id: None,
            status: status.as_str().to_string(),
            delivery_agent_id: Some(Uuid::new_v4()),
            delivery_status: delivery_status.map(|d| d.as_str().to_string()),
            created_at: None,
            updated_at: None,
        }
    }

    fn command_service(store: Arc<FakeOrderStore>) -> OrderCommandService {
        OrderCommandService::new(store.clone(), store, Arc::new(NoAgents))
    }

    #[tokio::test]
    async fn courier_cannot_close_an_order_still_in_the_warehouse() {
        let order = order(OrderStatus::Packed, Some(DeliveryStatus::OutForDelivery));
        let order_id = order.order_id;
        let store = Arc::new(FakeOrderStore::new(order));
        let service = command_service(store.clone());

        let req = UpdateDeliveryStatusRequest {
            delivery_status: DeliveryStatus::Delivered,
        };

        assert!(matches!(
            service.update_delivery_status(order_id, &req).await,
            Err(ServiceError::StateConflict(_))
        ));

        // Nothing moved.
        let untouched = store.order.lock().unwrap().clone();
        assert_eq!(untouched.status, "packed");
        assert_eq!(untouched.delivery_status.as_deref(), Some("out_for_delivery"));
    }

    #[tokio::test]
    async fn courier_delivery_closes_an_out_for_delivery_order() {
        let order = order(
            OrderStatus::OutForDelivery,
            Some(DeliveryStatus::OutForDelivery),
        );
        let order_id = order.order_id;
        let store = Arc::new(FakeOrderStore::new(order));
        let service = command_service(store);

        let req = UpdateDeliveryStatusRequest {
            delivery_status: DeliveryStatus::Delivered,
        };

        let response = service.update_delivery_status(order_id, &req).await.unwrap();

        assert_eq!(response.data.status, "delivered");
        assert_eq!(response.data.delivery_status.as_deref(), Some("delivered"));
    }

    #[tokio::test]
    async fn courier_confirmation_after_back_office_close_is_accepted() {
        let order = order(OrderStatus::Delivered, Some(DeliveryStatus::OutForDelivery));
        let order_id = order.order_id;
        let store = Arc::new(FakeOrderStore::new(order));
        let service = command_service(store);

        let req = UpdateDeliveryStatusRequest {
            delivery_status: DeliveryStatus::Delivered,
        };

        let response = service.update_delivery_status(order_id, &req).await.unwrap();
        assert_eq!(response.data.delivery_status.as_deref(), Some("delivered"));
    }

    #[tokio::test]
    async fn order_history_is_private_to_its_owner() {
        let order = order(OrderStatus::Confirmed, None);
        let order_id = order.order_id;
        let owner = order.user_id;
        let store = Arc::new(FakeOrderStore::new(order));

        store.history.lock().unwrap().push(OrderStatusHistory {
            history_id: Uuid::new_v4(),
            order_id,
            status: "confirmed".into(),
            notes: None,
            changed_by: None,
            created_at: Some(Utc::now()),
        });

        let service = OrderQueryService::new(store);

        let trail = service.find_history(order_id, owner, false).await.unwrap();
        assert_eq!(trail.data.len(), 1);
        assert_eq!(trail.data[0].status, "confirmed");

        assert!(matches!(
            service.find_history(order_id, Uuid::new_v4(), false).await,
            Err(ServiceError::Forbidden(_))
        ));

        // Back office reads any order's trail.
        assert!(
            service
                .find_history(order_id, Uuid::new_v4(), true)
                .await
                .is_ok()
        );
    }
}
