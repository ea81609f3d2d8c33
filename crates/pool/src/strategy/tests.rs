//! Tests for pooling strategies

use super::*;
use crate::errors::PoolError;
use tilepool_core::{Bitmap, PixelFormat};

fn bitmap(width: u32, height: u32, format: PixelFormat) -> Bitmap {
    Bitmap::new(width, height, format).unwrap()
}

fn all_strategies() -> Vec<Box<dyn LruPoolStrategy>> {
    vec![
        create_strategy(StrategyKind::SizeConfig),
        create_strategy(StrategyKind::Attribute),
    ]
}

#[test]
fn test_put_get_exist_scenario() {
    for strategy in all_strategies() {
        assert!(strategy.get(100, 100, PixelFormat::Argb8888).is_none());

        let a = bitmap(100, 100, PixelFormat::Argb8888);
        let a_id = a.id();
        assert_eq!(strategy.get_size(&a), 40_000);
        strategy.put(a);

        assert!(strategy.exist(100, 100, PixelFormat::Argb8888));
        let got = strategy.get(100, 100, PixelFormat::Argb8888).unwrap();
        assert_eq!(got.id(), a_id);
        assert_eq!(strategy.get_size(&got), 40_000);
        assert!(!strategy.exist(100, 100, PixelFormat::Argb8888));
        assert!(strategy.is_empty());
    }
}

#[test]
fn test_remove_last_order() {
    for strategy in all_strategies() {
        let a = bitmap(100, 100, PixelFormat::Argb8888);
        let b = bitmap(30, 30, PixelFormat::Rgb565);
        let (a_id, b_id) = (a.id(), b.id());

        strategy.put(a);
        strategy.put(b);

        assert_eq!(strategy.remove_last().unwrap().id(), a_id);
        assert_eq!(strategy.remove_last().unwrap().id(), b_id);
        assert!(strategy.remove_last().is_none());
    }
}

#[test]
fn test_get_takes_newest_in_class() {
    for strategy in all_strategies() {
        let older = bitmap(64, 64, PixelFormat::Alpha8);
        let newer = bitmap(64, 64, PixelFormat::Alpha8);
        let (older_id, newer_id) = (older.id(), newer.id());

        strategy.put(older);
        strategy.put(newer);

        assert_eq!(strategy.get(64, 64, PixelFormat::Alpha8).unwrap().id(), newer_id);
        assert_eq!(strategy.remove_last().unwrap().id(), older_id);
    }
}

#[test]
fn test_size_config_best_fit() {
    let strategy = SizeConfigStrategy::new();
    let large = bitmap(200, 200, PixelFormat::Argb8888);
    let medium = bitmap(120, 120, PixelFormat::Argb8888);
    let medium_id = medium.id();

    strategy.put(large);
    strategy.put(medium);

    let got = strategy.get(100, 100, PixelFormat::Argb8888).unwrap();
    assert_eq!(got.id(), medium_id);
    assert_eq!(got.width(), 100);
    assert_eq!(got.height(), 100);
    assert_eq!(got.byte_count(), 40_000);
    assert_eq!(strategy.get_size(&got), 57_600);
}

#[test]
fn test_size_config_respects_max_multiple() {
    let strategy = SizeConfigStrategy::new();
    // 90_000 bytes against a 10_000 byte request: more than 8x
    strategy.put(bitmap(150, 150, PixelFormat::Argb8888));

    assert!(!strategy.exist(50, 50, PixelFormat::Argb8888));
    assert!(strategy.get(50, 50, PixelFormat::Argb8888).is_none());
    // 90_000 against 40_000 is fine
    assert!(strategy.exist(100, 100, PixelFormat::Argb8888));
}

#[test]
fn test_size_config_rejects_smaller_allocation() {
    let strategy = SizeConfigStrategy::new();
    strategy.put(bitmap(99, 100, PixelFormat::Argb8888));

    assert!(!strategy.exist(100, 100, PixelFormat::Argb8888));
}

#[test]
fn test_size_config_finds_reconfigured_bitmap() {
    let strategy = SizeConfigStrategy::new();
    let mut shrunk = bitmap(100, 100, PixelFormat::Argb8888);
    shrunk.reconfigure(10, 10, PixelFormat::Alpha8).unwrap();
    let shrunk_id = shrunk.id();
    strategy.put(shrunk);

    // Classed by its 100 byte layout, not its 40_000 byte allocation
    assert_eq!(strategy.log_request(10, 10, Some(PixelFormat::Alpha8)), "[100](ALPHA_8)");
    assert!(strategy.exist(10, 10, PixelFormat::Alpha8));

    let got = strategy.get(10, 10, PixelFormat::Alpha8).unwrap();
    assert_eq!(got.id(), shrunk_id);
    assert_eq!(got.byte_count(), 100);
    assert_eq!(strategy.get_size(&got), 40_000);
}

#[test]
fn test_size_config_reconfigured_bitmap_serves_larger_request_in_class_range() {
    let strategy = SizeConfigStrategy::new();
    let mut shrunk = bitmap(100, 100, PixelFormat::Argb8888);
    shrunk.reconfigure(20, 20, PixelFormat::Argb8888).unwrap();
    strategy.put(shrunk);

    // 1_600 byte class holds a 15x15 request (900 bytes)
    let got = strategy.get(15, 15, PixelFormat::Argb8888).unwrap();
    assert_eq!((got.width(), got.height()), (15, 15));
    assert!(strategy.is_empty());
}

#[test]
fn test_size_config_compatible_formats() {
    let strategy = SizeConfigStrategy::new();
    let f16 = bitmap(50, 100, PixelFormat::RgbaF16);
    let f16_id = f16.id();
    strategy.put(f16);

    // 40_000 bytes of RGBA_F16 can hold 100x100 ARGB_8888
    assert!(strategy.exist(100, 100, PixelFormat::Argb8888));
    // but RGB_565 never borrows from other formats
    assert!(!strategy.exist(100, 100, PixelFormat::Rgb565));

    let got = strategy.get(100, 100, PixelFormat::Argb8888).unwrap();
    assert_eq!(got.id(), f16_id);
    assert_eq!(got.format(), PixelFormat::Argb8888);
}

#[test]
fn test_size_config_prefers_requested_format() {
    let strategy = SizeConfigStrategy::new();
    let f16 = bitmap(50, 100, PixelFormat::RgbaF16);
    let argb = bitmap(110, 110, PixelFormat::Argb8888);
    let argb_id = argb.id();

    strategy.put(f16);
    strategy.put(argb);

    assert_eq!(
        strategy.get(100, 100, PixelFormat::Argb8888).unwrap().id(),
        argb_id
    );
}

#[test]
fn test_size_config_zero_dimensions_never_match() {
    let strategy = SizeConfigStrategy::new();
    strategy.put(bitmap(10, 10, PixelFormat::Alpha8));

    assert!(!strategy.exist(0, 10, PixelFormat::Alpha8));
    assert!(strategy.get(0, 10, PixelFormat::Alpha8).is_none());
    assert_eq!(strategy.len(), 1);
}

#[test]
fn test_attribute_exact_match_only() {
    let strategy = AttributeStrategy::new();
    strategy.put(bitmap(120, 120, PixelFormat::Argb8888));

    assert!(!strategy.exist(100, 100, PixelFormat::Argb8888));
    assert!(!strategy.exist(120, 120, PixelFormat::RgbaF16));
    assert!(strategy.exist(120, 120, PixelFormat::Argb8888));
}

#[test]
fn test_log_descriptors() {
    let size_config = SizeConfigStrategy::new();
    let attribute = AttributeStrategy::new();
    let b = bitmap(100, 100, PixelFormat::Rgb565);

    assert_eq!(size_config.log_bitmap(&b), "[20000](RGB_565)");
    assert_eq!(
        size_config.log_request(100, 100, Some(PixelFormat::Alpha8)),
        "[10000](ALPHA_8)"
    );
    assert_eq!(size_config.log_request(100, 100, None), "[40000](ARGB_8888)");

    assert_eq!(attribute.log_bitmap(&b), "[100x100], RGB_565");
    assert_eq!(attribute.log_request(3, 4, None), "[3x4], any");
}

#[test]
fn test_strategy_kind_parsing() {
    assert_eq!(
        "size-config".parse::<StrategyKind>().unwrap(),
        StrategyKind::SizeConfig
    );
    assert_eq!("EXACT".parse::<StrategyKind>().unwrap(), StrategyKind::Attribute);
    assert!(matches!(
        "lfu".parse::<StrategyKind>(),
        Err(PoolError::Configuration { .. })
    ));
}

#[test]
fn test_create_strategy_from_name() {
    let strategy = create_strategy_from_name("attribute").unwrap();
    strategy.put(bitmap(8, 8, PixelFormat::Alpha8));
    assert_eq!(strategy.log_request(8, 8, Some(PixelFormat::Alpha8)), "[8x8], ALPHA_8");

    assert!(create_strategy_from_name("arc").is_err());
}
