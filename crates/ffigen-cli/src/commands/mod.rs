pub mod check;
pub mod dispatch;
pub mod extract;
pub mod schema;
