// =============================================================================
// Storedesk Web - Named Routes
// =============================================================================
// Static table of every navigable view. The router in `app.rs` mounts these
// paths; the response interceptor redirects to them by name.
// =============================================================================

/// A named navigation target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NamedRoute {
    // Account area
    Login,
    Signup1,
    Signup2,
    SignupDone,
    StoreRegister,
    StoreDone,
    FindPwd1,
    FindPwd2,

    // Store area
    Dashboard,
    MenuMain,
    MenuCategory,
    MenuOption,
    MenuAnalysis,
    InventoryAnalysis,
    SalesAnalysis,
    InventoryMain,
    InventoryRegister,
    CommunityMap,
    CommunityList,
    CommunityTransactions,
    MyPage,
    PosMain,
    PosMenu,
    PosPay,
    PosDelivery,
}

impl NamedRoute {
    pub const ALL: [NamedRoute; 25] = [
        NamedRoute::Login,
        NamedRoute::Signup1,
        NamedRoute::Signup2,
        NamedRoute::SignupDone,
        NamedRoute::StoreRegister,
        NamedRoute::StoreDone,
        NamedRoute::FindPwd1,
        NamedRoute::FindPwd2,
        NamedRoute::Dashboard,
        NamedRoute::MenuMain,
        NamedRoute::MenuCategory,
        NamedRoute::MenuOption,
        NamedRoute::MenuAnalysis,
        NamedRoute::InventoryAnalysis,
        NamedRoute::SalesAnalysis,
        NamedRoute::InventoryMain,
        NamedRoute::InventoryRegister,
        NamedRoute::CommunityMap,
        NamedRoute::CommunityList,
        NamedRoute::CommunityTransactions,
        NamedRoute::MyPage,
        NamedRoute::PosMain,
        NamedRoute::PosMenu,
        NamedRoute::PosPay,
        NamedRoute::PosDelivery,
    ];

    /// Route name used for named navigation.
    pub fn name(&self) -> &'static str {
        match self {
            NamedRoute::Login => "login",
            NamedRoute::Signup1 => "signup1",
            NamedRoute::Signup2 => "signup2",
            NamedRoute::SignupDone => "signupDone",
            NamedRoute::StoreRegister => "storeRegister",
            NamedRoute::StoreDone => "storedone",
            NamedRoute::FindPwd1 => "findpwd1",
            NamedRoute::FindPwd2 => "findpwd2",
            NamedRoute::Dashboard => "dashboard",
            NamedRoute::MenuMain => "MenuMain",
            NamedRoute::MenuCategory => "MenuCategory",
            NamedRoute::MenuOption => "MenuOption",
            NamedRoute::MenuAnalysis => "MenuAnalysis",
            NamedRoute::InventoryAnalysis => "InventoryAnalysis",
            NamedRoute::SalesAnalysis => "SalesAnalysis",
            NamedRoute::InventoryMain => "InventoryMain",
            NamedRoute::InventoryRegister => "InventoryRegister",
            NamedRoute::CommunityMap => "CommunityMap",
            NamedRoute::CommunityList => "CommunityList",
            NamedRoute::CommunityTransactions => "CommunityTransactions",
            NamedRoute::MyPage => "MyPage",
            NamedRoute::PosMain => "POSMain",
            NamedRoute::PosMenu => "POSMenu",
            NamedRoute::PosPay => "POSPay",
            NamedRoute::PosDelivery => "POSDelivery",
        }
    }

    /// Absolute path the router mounts the view at.
    pub fn path(&self) -> &'static str {
        match self {
            NamedRoute::Login => "/account/login",
            NamedRoute::Signup1 => "/account/signup1",
            NamedRoute::Signup2 => "/account/signup2",
            NamedRoute::SignupDone => "/account/sdone",
            NamedRoute::StoreRegister => "/account/register",
            NamedRoute::StoreDone => "/account/rdone",
            NamedRoute::FindPwd1 => "/account/findpwd1",
            NamedRoute::FindPwd2 => "/account/findpwd2",
            NamedRoute::Dashboard => "/",
            NamedRoute::MenuMain => "/menu",
            NamedRoute::MenuCategory => "/category",
            NamedRoute::MenuOption => "/option",
            NamedRoute::MenuAnalysis => "/menuAnalysis",
            NamedRoute::InventoryAnalysis => "/inventoryAnalysis",
            NamedRoute::SalesAnalysis => "/salesAnalysis",
            NamedRoute::InventoryMain => "/inventory",
            NamedRoute::InventoryRegister => "/inventoryregi",
            NamedRoute::CommunityMap => "/map",
            NamedRoute::CommunityList => "/list",
            NamedRoute::CommunityTransactions => "/transactions",
            NamedRoute::MyPage => "/mypage",
            NamedRoute::PosMain => "/pos",
            NamedRoute::PosMenu => "/posmenu",
            NamedRoute::PosPay => "/pay",
            NamedRoute::PosDelivery => "/deliverypositem",
        }
    }

    /// Look a route up by its name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|route| route.name() == name)
    }
}
