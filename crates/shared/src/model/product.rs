use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub product_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub subcategory: Option<String>,
    pub price: i64,
    pub deal_price: Option<i64>,
    pub is_deal: bool,
    pub deal_expires_at: Option<DateTime<Utc>>,
    pub stock: i32,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Deal price applies while the deal flag is set and the expiry, if any,
    /// has not passed.
    pub fn effective_price(&self, now: DateTime<Utc>) -> i64 {
        match (self.is_deal, self.deal_price) {
            (true, Some(deal)) => match self.deal_expires_at {
                Some(expiry) if expiry <= now => self.price,
                _ => deal,
            },
            _ => self.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn product(price: i64, deal_price: Option<i64>, is_deal: bool) -> Product {
        Product {
            product_id: Uuid::new_v4(),
            name: "Vitamin C Serum".into(),
            description: None,
            category: "skincare".into(),
            subcategory: None,
            price,
            deal_price,
            is_deal,
            deal_expires_at: None,
            stock: 10,
            image_url: None,
            is_active: true,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        }
    }

    #[test]
    fn deal_price_wins_while_unexpired() {
        let now = Utc::now();
        let mut p = product(100000, Some(70000), true);
        p.deal_expires_at = Some(now + Duration::days(1));

        assert_eq!(p.effective_price(now), 70000);
    }

    #[test]
    fn expired_deal_falls_back_to_list_price() {
        let now = Utc::now();
        let mut p = product(100000, Some(70000), true);
        p.deal_expires_at = Some(now - Duration::days(1));

        assert_eq!(p.effective_price(now), 100000);
    }

    #[test]
    fn deal_without_expiry_stays_active() {
        let p = product(100000, Some(70000), true);
        assert_eq!(p.effective_price(Utc::now()), 70000);
    }

    #[test]
    fn non_deal_uses_list_price() {
        let p = product(100000, Some(70000), false);
        assert_eq!(p.effective_price(Utc::now()), 100000);
    }
}
