//! Catalog fixture shared by unit tests.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::{AdSize, Area, Catalog, Duration, PaymentOption, PricingModel, VolumeDiscountTier};

pub const FULL_PAGE: Uuid = Uuid::from_u128(0x5100);
pub const QUARTER_PAGE: Uuid = Uuid::from_u128(0x5200);
pub const A5_LEAFLET: Uuid = Uuid::from_u128(0x5300);

pub const ONE_ISSUE: Uuid = Uuid::from_u128(0xD100);
pub const THREE_ISSUES: Uuid = Uuid::from_u128(0xD300);
pub const SIX_MONTHS: Uuid = Uuid::from_u128(0xE600);
pub const TWELVE_MONTHS: Uuid = Uuid::from_u128(0xEC00);

pub const MONTHLY: Uuid = Uuid::from_u128(0x9100);
pub const SIX_MONTH_LUMP: Uuid = Uuid::from_u128(0x9600);
pub const TWELVE_MONTH_LUMP: Uuid = Uuid::from_u128(0x9C00);
pub const CHEQUE: Uuid = Uuid::from_u128(0x9F00);

/// Id of area `n` (1-based).
pub fn area(n: u128) -> Uuid {
    Uuid::from_u128(0xA000 + n)
}

pub fn areas(range: std::ops::RangeInclusive<u128>) -> Vec<Uuid> {
    range.map(area).collect()
}

fn table(prices: [i64; 14]) -> BTreeMap<String, Decimal> {
    prices
        .iter()
        .enumerate()
        .map(|(i, p)| ((i + 1).to_string(), Decimal::from(*p)))
        .collect()
}

pub fn catalog() -> Catalog {
    let circulations: [u32; 16] = [
        10_000, 11_300, 12_500, 8_400, 8_500, 8_600, 8_700, 8_800, 8_900, 9_000, 9_100, 9_200,
        9_300, 9_400, 9_500, 9_600,
    ];

    let areas = circulations
        .iter()
        .enumerate()
        .map(|(i, c)| Area {
            id: area(i as u128 + 1),
            name: format!("Area {}", i + 1),
            circulation: *c,
            price_multipliers: HashMap::new(),
        })
        .collect();

    let full_page = AdSize {
        id: FULL_PAGE,
        name: "Full Page".to_string(),
        dimensions: "190 x 277mm".to_string(),
        base_price_per_area: dec!(320),
        base_price_per_month: dec!(280),
        fixed_pricing_per_issue: table([
            300, 550, 700, 850, 1000, 1150, 1290, 1420, 1540, 1650, 1750, 1840, 1920, 1990,
        ]),
        subscription_pricing_per_issue: table([
            250, 460, 600, 720, 850, 970, 1080, 1180, 1270, 1350, 1420, 1480, 1530, 1570,
        ]),
        available_for: vec![
            PricingModel::Fixed,
            PricingModel::Subscription,
            PricingModel::Bogof,
        ],
    };

    let quarter_page = AdSize {
        id: QUARTER_PAGE,
        name: "Quarter Page".to_string(),
        dimensions: "93 x 132mm".to_string(),
        base_price_per_area: dec!(90),
        base_price_per_month: dec!(80),
        fixed_pricing_per_issue: table([
            90, 170, 240, 300, 360, 420, 470, 520, 560, 600, 640, 670, 700, 720,
        ]),
        subscription_pricing_per_issue: BTreeMap::new(),
        available_for: vec![PricingModel::Fixed],
    };

    let a5_leaflet = AdSize {
        id: A5_LEAFLET,
        name: "A5 Leaflet".to_string(),
        dimensions: "148 x 210mm".to_string(),
        base_price_per_area: dec!(120),
        base_price_per_month: Decimal::ZERO,
        fixed_pricing_per_issue: BTreeMap::new(),
        subscription_pricing_per_issue: BTreeMap::new(),
        available_for: vec![PricingModel::Leafleting],
    };

    let durations = vec![
        Duration {
            id: ONE_ISSUE,
            name: "1 Issue".to_string(),
            duration_value: 1,
            discount_percentage: dec!(0),
            is_subscription: false,
        },
        Duration {
            id: THREE_ISSUES,
            name: "3 Issues".to_string(),
            duration_value: 3,
            discount_percentage: dec!(10),
            is_subscription: false,
        },
    ];

    let subscription_durations = vec![
        Duration {
            id: SIX_MONTHS,
            name: "6 Months".to_string(),
            duration_value: 6,
            discount_percentage: dec!(10),
            is_subscription: true,
        },
        Duration {
            id: TWELVE_MONTHS,
            name: "12 Months".to_string(),
            duration_value: 12,
            discount_percentage: dec!(20),
            is_subscription: true,
        },
    ];

    let tiers = [
        (1, 2, dec!(0)),
        (3, 5, dec!(5)),
        (6, 9, dec!(10)),
        (10, 14, dec!(15)),
    ];
    let volume_discounts = tiers
        .into_iter()
        .enumerate()
        .map(|(i, (min, max, pct))| VolumeDiscountTier {
            id: Uuid::from_u128(0x7000 + i as u128),
            min_areas: min,
            max_areas: max,
            discount_percentage: pct,
        })
        .collect();

    let payment_options = vec![
        PaymentOption {
            id: MONTHLY,
            option_type: "monthly".to_string(),
            display_name: "Monthly Direct Debit".to_string(),
            minimum_payments: 3,
            discount_percentage: dec!(0),
        },
        PaymentOption {
            id: SIX_MONTH_LUMP,
            option_type: "lump_sum".to_string(),
            display_name: "6 Month Payment".to_string(),
            minimum_payments: 1,
            discount_percentage: dec!(0),
        },
        PaymentOption {
            id: TWELVE_MONTH_LUMP,
            option_type: "lump_sum".to_string(),
            display_name: "12 Month Payment".to_string(),
            minimum_payments: 1,
            discount_percentage: dec!(5),
        },
        PaymentOption {
            id: CHEQUE,
            option_type: "cheque".to_string(),
            display_name: "Pay by Cheque".to_string(),
            minimum_payments: 1,
            discount_percentage: dec!(0),
        },
    ];

    Catalog {
        areas,
        ad_sizes: vec![full_page, quarter_page, a5_leaflet],
        durations,
        subscription_durations,
        volume_discounts,
        payment_options,
        design_fee: dec!(75),
    }
}
