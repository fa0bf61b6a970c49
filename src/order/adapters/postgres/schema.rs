//! Diesel schema for order persistence.

diesel::table! {
    /// Order header records.
    orders (id) {
        /// Internal order identifier.
        id -> Uuid,
        /// Unique human-facing order number.
        #[max_length = 50]
        number -> Varchar,
        /// Lifecycle status code.
        status -> SmallInt,
        /// Customer who placed the order.
        customer_id -> BigInt,
        /// Placement time.
        order_time -> Timestamptz,
        /// Payment time.
        checkout_time -> Nullable<Timestamptz>,
        /// Payment method code.
        pay_method -> Nullable<SmallInt>,
        /// Payment status code.
        pay_status -> SmallInt,
        /// Order total in minor currency units.
        amount -> BigInt,
        /// Customer remark.
        #[max_length = 255]
        remark -> Nullable<Varchar>,
        /// Delivery consignee.
        #[max_length = 64]
        consignee -> Varchar,
        /// Delivery phone number.
        #[max_length = 32]
        phone -> Varchar,
        /// Delivery address.
        #[max_length = 255]
        address -> Varchar,
        /// Cancellation reason.
        #[max_length = 255]
        cancel_reason -> Nullable<Varchar>,
        /// Merchant rejection reason.
        #[max_length = 255]
        rejection_reason -> Nullable<Varchar>,
        /// Cancellation time.
        cancel_time -> Nullable<Timestamptz>,
        /// Estimated delivery time.
        estimated_delivery_time -> Nullable<Timestamptz>,
        /// Actual delivery time.
        delivery_time -> Nullable<Timestamptz>,
        /// Audit creation time.
        create_time -> Nullable<Timestamptz>,
        /// Audit modification time.
        update_time -> Nullable<Timestamptz>,
        /// Audit creating actor.
        create_user -> Nullable<BigInt>,
        /// Audit modifying actor.
        update_user -> Nullable<BigInt>,
    }
}

diesel::table! {
    /// Order line records.
    order_details (id) {
        /// Surrogate line identifier.
        id -> BigInt,
        /// Owning order.
        order_id -> Uuid,
        /// Item name.
        #[max_length = 64]
        name -> Varchar,
        /// Purchased quantity.
        quantity -> Integer,
        /// Line total in minor currency units.
        amount -> BigInt,
    }
}

diesel::joinable!(order_details -> orders (order_id));
diesel::allow_tables_to_appear_in_same_query!(orders, order_details);
