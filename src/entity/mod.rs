pub mod items;
pub mod sales;
pub mod users;

pub use items::Entity as Items;
pub use sales::Entity as Sales;
pub use users::Entity as Users;
