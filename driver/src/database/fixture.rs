use time::macros::date;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::update::{
    CarModifier, DependOnCarModifier, DependOnOrderModifier, DependOnUserModifier, OrderModifier,
    UserModifier,
};
use kernel::prelude::entity::{
    Car, CarBrand, CarCondition, CarId, CarModel, CarPrice, CarYear, Order, OrderDate, OrderId,
    OrderStatus, Role, User, UserAge, UserCity, UserId, UserLogin, UserName, UserPassword,
    UserRoles,
};
use kernel::KernelError;

fn demo_cars() -> Vec<Car> {
    [
        ("BMW", "M4", 2024, 25000.0, "new"),
        ("Volvo", "S40", 2023, 17500.0, "good"),
        ("Mercedes", "SLS", 2024, 25000.0, "new"),
        ("Volvo", "S60", 2019, 25000.0, "good"),
        ("Audi", "Q3", 2020, 19500.80, "good"),
    ]
    .into_iter()
    .map(|(brand, model, year, price, condition)| {
        Car::new(
            CarId::default(),
            CarBrand::new(brand),
            CarModel::new(model),
            CarYear::new(year),
            CarPrice::new(price),
            CarCondition::new(condition),
        )
    })
    .collect()
}

fn demo_users() -> error_stack::Result<Vec<User>, KernelError> {
    [
        ("admin", "Alexandr", 33, "Moscow", Role::Administrator),
        ("manager1", "John", 36, "New-York", Role::Manager),
        ("manager2", "Alexandr", 34, "Moscow", Role::Manager),
        ("client1", "Tanya", 25, "London", Role::Client),
        ("client2", "Valera", 45, "Milan", Role::Client),
        ("client3", "Robert", 33, "Moscow", Role::Client),
    ]
    .into_iter()
    .map(|(login, name, age, city, role)| -> error_stack::Result<User, KernelError> {
        Ok(User::new(
            UserId::default(),
            UserLogin::new(login),
            UserPassword::hash(login)?,
            UserName::new(name),
            UserAge::new(age),
            UserCity::new(city),
            UserRoles::new([role]),
        ))
    })
    .collect()
}

/// Fills an empty store with a small showroom: five cars, one administrator, two managers,
/// three clients and two completed orders. Every demo user's password equals its login.
pub async fn seed_demo_data<D>(db: &D) -> error_stack::Result<(), KernelError>
where
    D: DependOnCarModifier + DependOnUserModifier + DependOnOrderModifier,
{
    let mut con = db.database_connection().transact().await?;

    let mut cars = Vec::new();
    for car in demo_cars() {
        cars.push(db.car_modifier().create(&mut con, &car).await?);
    }
    let mut users = Vec::new();
    for user in demo_users()? {
        users.push(db.user_modifier().create(&mut con, &user).await?);
    }

    let orders = [
        (users[2], cars[3], date!(2024 - 12 - 12)),
        (users[3], cars[1], date!(2024 - 11 - 11)),
    ];
    for (user_id, car_id, date) in orders {
        let order = Order::new(
            OrderId::default(),
            user_id,
            car_id,
            OrderDate::new(date),
            OrderStatus::new("successfully"),
        );
        db.order_modifier().create(&mut con, &order).await?;
    }

    con.commit().await?;
    tracing::info!(
        "Seeded {} cars, {} users and {} orders",
        cars.len(),
        users.len(),
        orders.len()
    );
    Ok(())
}
