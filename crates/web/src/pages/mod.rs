// =============================================================================
// Storedesk Web - Page Components
// =============================================================================
// Table of Contents:
// 1. Account Pages
// 2. Store Pages
// =============================================================================

pub mod account;
pub mod inventory;
pub mod market;
pub mod menu;
pub mod my_page;
pub mod not_found;
pub mod pos;
pub mod sales;

pub use account::{
    FindPwd1Page, FindPwd2Page, LoginPage, Signup1Page, Signup2Page, SignupDonePage,
    StoreDonePage, StoreRegisterPage,
};
pub use inventory::{InventoryPage, InventoryRegisterPage};
pub use market::{MarketListPage, MarketMapPage, TransactionsPage};
pub use menu::{CategoryPage, MenuPage, OptionPage};
pub use my_page::MyPage;
pub use not_found::NotFoundPage;
pub use pos::{PosCart, PosDeliveryPage, PosMainPage, PosMenuPage, PosPayPage};
pub use sales::{DashboardPage, InventoryAnalysisPage, MenuAnalysisPage, SalesAnalysisPage};
