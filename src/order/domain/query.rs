//! Query, paging and reporting value types for orders.

use super::{CustomerId, OrderDomainError, OrderStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Filtered, paginated order search.
///
/// Time bounds apply to the placement time and form the half-open range
/// `[begin, end)`. Number and phone filters match substrings. Results are
/// ordered by placement time, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPageQuery {
    page: u32,
    page_size: u32,
    customer_id: Option<CustomerId>,
    status: Option<OrderStatus>,
    number: Option<String>,
    phone: Option<String>,
    begin: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl OrderPageQuery {
    /// Creates an unfiltered query for a 1-based page.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::InvalidPage`] when `page` or `page_size`
    /// is zero.
    pub const fn new(page: u32, page_size: u32) -> Result<Self, OrderDomainError> {
        if page == 0 || page_size == 0 {
            return Err(OrderDomainError::InvalidPage { page, page_size });
        }
        Ok(Self {
            page,
            page_size,
            customer_id: None,
            status: None,
            number: None,
            phone: None,
            begin: None,
            end: None,
        })
    }

    /// Restricts results to one customer.
    #[must_use]
    pub const fn with_customer(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    /// Restricts results to one status.
    #[must_use]
    pub const fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts results to numbers containing `fragment`.
    #[must_use]
    pub fn with_number(mut self, fragment: impl Into<String>) -> Self {
        self.number = Some(fragment.into());
        self
    }

    /// Restricts results to phone numbers containing `fragment`.
    #[must_use]
    pub fn with_phone(mut self, fragment: impl Into<String>) -> Self {
        self.phone = Some(fragment.into());
        self
    }

    /// Restricts results to orders placed in `[begin, end)`.
    #[must_use]
    pub const fn with_time_range(
        mut self,
        begin: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Self {
        self.begin = begin;
        self.end = end;
        self
    }

    /// Returns the 1-based page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the number of records skipped before this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        (u64::from(self.page) - 1) * u64::from(self.page_size)
    }

    /// Returns the customer filter.
    #[must_use]
    pub const fn customer_id(&self) -> Option<CustomerId> {
        self.customer_id
    }

    /// Returns the status filter.
    #[must_use]
    pub const fn status(&self) -> Option<OrderStatus> {
        self.status
    }

    /// Returns the number substring filter.
    #[must_use]
    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }

    /// Returns the phone substring filter.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Returns the inclusive lower time bound.
    #[must_use]
    pub const fn begin(&self) -> Option<DateTime<Utc>> {
        self.begin
    }

    /// Returns the exclusive upper time bound.
    #[must_use]
    pub const fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }
}

/// One page of results plus the total number of matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Number of records matching the filters across all pages.
    pub total: u64,
    /// Records on the requested page.
    pub records: Vec<T>,
}

/// Filter for turnover, count and top-sales reports.
///
/// Time bounds form the half-open range `[begin, end)` over placement time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderMetricsFilter {
    begin: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    status: Option<OrderStatus>,
}

impl OrderMetricsFilter {
    /// Creates a filter matching every order.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            begin: None,
            end: None,
            status: None,
        }
    }

    /// Creates a filter over `[begin, end)`.
    #[must_use]
    pub const fn between(begin: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            begin: Some(begin),
            end: Some(end),
            status: None,
        }
    }

    /// Restricts the filter to one status.
    #[must_use]
    pub const fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns the inclusive lower time bound.
    #[must_use]
    pub const fn begin(&self) -> Option<DateTime<Utc>> {
        self.begin
    }

    /// Returns the exclusive upper time bound.
    #[must_use]
    pub const fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    /// Returns the status filter.
    #[must_use]
    pub const fn status(&self) -> Option<OrderStatus> {
        self.status
    }

    /// Returns whether an order with these attributes matches.
    #[must_use]
    pub fn matches(&self, status: OrderStatus, order_time: DateTime<Utc>) -> bool {
        self.status.is_none_or(|wanted| wanted == status)
            && self.begin.is_none_or(|begin| order_time >= begin)
            && self.end.is_none_or(|end| order_time < end)
    }
}

/// Quantity sold of one item name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoodsSales {
    /// Item name.
    pub name: String,
    /// Total quantity sold.
    pub quantity: u64,
}
