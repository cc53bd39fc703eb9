//! Compiled-in seed catalog
//!
//! Seed brands are never stored remotely as such; every session reconciles the
//! remote brand records against this list. Seed categories are installed into
//! a store context that has none yet.

use std::sync::LazyLock;

use shared::models::{Brand, CategoryCreate};

struct SeedBrand {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    tagline: &'static str,
    capacity: &'static str,
}

const SEED_BRAND_TABLE: &[SeedBrand] = &[
    SeedBrand {
        id: "geekbar-pulse",
        name: "Geek Bar Pulse",
        category: "disposable-vapes",
        tagline: "Dual-mode disposable",
        capacity: "15000 puffs",
    },
    SeedBrand {
        id: "lost-mary-mo5000",
        name: "Lost Mary MO5000",
        category: "disposable-vapes",
        tagline: "Mesh coil, rechargeable",
        capacity: "5000 puffs",
    },
    SeedBrand {
        id: "elf-bar-bc5000",
        name: "Elf Bar BC5000",
        category: "disposable-vapes",
        tagline: "Rechargeable disposable",
        capacity: "5000 puffs",
    },
    SeedBrand {
        id: "fume-extra",
        name: "Fume Extra",
        category: "disposable-vapes",
        tagline: "Compact and ready to use",
        capacity: "1500 puffs",
    },
    SeedBrand {
        id: "breeze-smoke",
        name: "Breeze Smoke",
        category: "disposable-vapes",
        tagline: "Smooth draw",
        capacity: "2000 puffs",
    },
    SeedBrand {
        id: "stiiizy-liiil",
        name: "Stiiizy LIIIL",
        category: "thc-disposables",
        tagline: "All-in-one THC disposable",
        capacity: "1g",
    },
    SeedBrand {
        id: "packwoods",
        name: "Packwoods",
        category: "thc-disposables",
        tagline: "Live resin blends",
        capacity: "2g",
    },
    SeedBrand {
        id: "wyld",
        name: "Wyld",
        category: "edibles",
        tagline: "Real fruit gummies",
        capacity: "10 pieces",
    },
    SeedBrand {
        id: "kiva",
        name: "Kiva",
        category: "edibles",
        tagline: "Chocolate bars and bites",
        capacity: "20 pieces",
    },
    SeedBrand {
        id: "marlboro",
        name: "Marlboro",
        category: "cigarettes",
        tagline: "Classic cigarettes",
        capacity: "20 per pack",
    },
];

/// Seed brands in display-default order
pub static SEED_BRANDS: LazyLock<Vec<Brand>> = LazyLock::new(|| {
    SEED_BRAND_TABLE
        .iter()
        .map(|s| Brand {
            id: s.id.into(),
            name: s.name.into(),
            category: Some(s.category.into()),
            store: None,
            tagline: Some(s.tagline.into()),
            description: None,
            capacity: Some(s.capacity.into()),
            image: None,
        })
        .collect()
});

/// Seed categories, `order` following list position
pub fn seed_categories() -> Vec<CategoryCreate> {
    [
        ("Disposable Vapes", "disposable-vapes"),
        ("THC Disposables", "thc-disposables"),
        ("Edibles", "edibles"),
        ("Cigarettes", "cigarettes"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, slug))| CategoryCreate {
        name: name.into(),
        slug: Some(slug.into()),
        order: Some(i as i32),
    })
    .collect()
}
