pub mod alert_list;
pub mod navbar;
pub mod page;
pub mod route_card;

pub use alert_list::AlertList;
pub use navbar::Navbar;
pub use page::Page;
pub use route_card::RouteCard;
