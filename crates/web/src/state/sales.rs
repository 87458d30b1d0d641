// =============================================================================
// Storedesk Web - Sales Store
// =============================================================================

use std::sync::Arc;

use leptos::prelude::*;
use serde_json::Value;

use crate::api::user::{self, PeriodRange, YearMonth};
use crate::api::{Gateway, Lookup};

const MONTH_SALES_FAILED: &str = "매출 데이터를 불러오지 못했습니다.";
const SALE_DETAIL_FAILED: &str = "상세 매출 데이터를 불러오지 못했습니다.";

/// Monthly and per-period sales figures.
#[derive(Clone, Copy)]
pub struct SaleStore {
    pub month_sales: RwSignal<Value>,
    pub sale_detail: RwSignal<Value>,
    pub is_loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    gateway: StoredValue<Arc<Gateway>>,
}

impl SaleStore {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self {
            month_sales: RwSignal::new(Value::Array(Vec::new())),
            sale_detail: RwSignal::new(Value::Array(Vec::new())),
            is_loading: RwSignal::new(false),
            error: RwSignal::new(None),
            gateway: StoredValue::new(gateway),
        }
    }

    pub async fn fetch_month_sales(&self, month: YearMonth) {
        self.begin();
        let gateway = self.gateway.get_value();
        match user::search_month_sales(&gateway.user, &month).await {
            Lookup::Found(data) => self.month_sales.set(data),
            Lookup::NotFound => self.error.set(Some(MONTH_SALES_FAILED.to_string())),
        }
        self.is_loading.set(false);
    }

    pub async fn fetch_sale_detail(&self, range: PeriodRange) {
        self.begin();
        let gateway = self.gateway.get_value();
        match user::search_sale_detail(&gateway.user, &range).await {
            Lookup::Found(data) => self.sale_detail.set(data),
            Lookup::NotFound => self.error.set(Some(SALE_DETAIL_FAILED.to_string())),
        }
        self.is_loading.set(false);
    }

    fn begin(&self) {
        self.is_loading.set(true);
        self.error.set(None);
    }
}
