//! 本客戶端認得的卡牌

pub const COPPER: &str = "Copper";
pub const SILVER: &str = "Silver";
pub const GOLD: &str = "Gold";
pub const PROVINCE: &str = "Province";
pub const CURSE: &str = "Curse";

pub const MARKET: &str = "Market";
pub const VILLAGE: &str = "Village";
pub const MERCHANT: &str = "Merchant";
pub const SMITHY: &str = "Smithy";
pub const MOAT: &str = "Moat";
pub const WORKSHOP: &str = "Workshop";

/// 行動階段的出牌優先順序，也是會被打出的全部行動牌
pub const ACTION_PRIORITY: [&str; 5] = [MARKET, VILLAGE, MERCHANT, SMITHY, MOAT];

/// 購買階段會全部打出的錢幣牌
pub const TREASURES: [&str; 3] = [COPPER, SILVER, GOLD];

pub fn is_treasure(card: &str) -> bool {
    TREASURES.contains(&card)
}
