//! Storefront backend models

pub mod admin;
pub mod cart;
pub mod order;
pub mod product;
pub mod user;

// Re-export for convenience
pub use admin::Admin;
pub use cart::{CartLine, cart_total, normalize_lines};
pub use order::{
    AdminOrderView, CustomerDetails, NewOrder, Order, OrderOwner, OrderRequest, OrderStatus,
    PlaceOrderBody, UpdateStatusBody, generate_order_id,
};
pub use product::{NewProduct, Product, UpdateProduct};
pub use user::{
    AdminUserSummary, LoginRequest, SafeUser, SignupRequest, UpdateProfileRequest, User,
    UserProfile,
};
