use error_stack::Report;
use time::Date;

use kernel::prelude::entity::{DestructOrder, Order, OrderDate};
use kernel::KernelError;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct OrderDto {
    pub id: i32,
    pub user_id: i32,
    pub car_id: i32,
    pub date: Date,
    pub status: String,
}

impl From<Order> for OrderDto {
    fn from(value: Order) -> Self {
        let DestructOrder {
            id,
            user_id,
            car_id,
            date,
            status,
        } = value.into_destruct();
        Self {
            id: id.into(),
            user_id: user_id.into(),
            car_id: car_id.into(),
            date: date.into(),
            status: status.into(),
        }
    }
}

pub struct GetOrderDto {
    pub id: i32,
}

pub struct GetUserOrdersDto {
    pub user_id: i32,
}

/// Missing `date` means today, missing `status` means `created`.
#[derive(Debug, Clone)]
pub struct CreateOrderDto {
    pub user_id: i32,
    pub car_id: i32,
    pub date: Option<Date>,
    pub status: Option<String>,
}

pub struct ChangeOrderStatusDto {
    pub id: i32,
    pub status: String,
}

pub struct CancelOrderDto {
    pub id: i32,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum OrderFilter {
    Date(Date),
    Status(String),
}

impl OrderFilter {
    pub fn parse(name: &str, params: &str) -> error_stack::Result<Self, KernelError> {
        match name {
            "date" => OrderDate::parse(params.trim())
                .map(|date| Self::Date(date.into()))
                .map_err(|error| {
                    Report::new(KernelError::InvalidInput)
                        .attach_printable(format!("Invalid date '{params}': {error}"))
                }),
            "status" => Ok(Self::Status(params.to_string())),
            _ => Err(Report::new(KernelError::InvalidInput)
                .attach_printable(format!("Unknown order filter: {name}"))),
        }
    }
}

#[cfg(test)]
mod test {
    use time::macros::date;

    use kernel::KernelError;

    use super::OrderFilter;

    #[test]
    fn parse_date_filter() {
        assert_eq!(
            OrderFilter::parse("date", "2024-12-12").unwrap(),
            OrderFilter::Date(date!(2024 - 12 - 12))
        );
        let report = OrderFilter::parse("date", "12.12.2024").unwrap_err();
        assert_eq!(report.current_context(), &KernelError::InvalidInput);
    }
}
