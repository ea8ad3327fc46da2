use crate::{ActionFamily, Implement, ItemCategory, Tool, ToolKind, TractorConfig};

/// Decide which action family the held implement performs this pass.
///
/// Pure function of its inputs.
pub fn classify(implement: &Implement, config: &TractorConfig) -> ActionFamily {
    match implement {
        Implement::Tool(tool) if tool.is_scythe() => {
            if config.scythe_harvests {
                ActionFamily::Harvesting
            } else {
                ActionFamily::None
            }
        }
        Implement::Tool(tool) => classify_tool(tool, config),
        Implement::Item(item) => match item.category {
            ItemCategory::Seed | ItemCategory::Fertilizer => ActionFamily::PlantingOrFertilizing,
            ItemCategory::Other(_) => ActionFamily::None,
        },
        Implement::Empty => ActionFamily::None,
    }
}

fn classify_tool(tool: &Tool, config: &TractorConfig) -> ActionFamily {
    let allow_listed = config.custom_tools.iter().any(|name| *name == tool.name);
    let (family, enabled) = match tool.kind {
        ToolKind::WateringCan => (ActionFamily::Watering, config.watering_can_waters),
        ToolKind::Hoe => (ActionFamily::Tilling, config.hoe_tills_dirt),
        ToolKind::Pickaxe => (
            ActionFamily::Clearing,
            config.pickaxe_clears_dirt
                || config.pickaxe_breaks_rocks
                || config.pickaxe_breaks_flooring,
        ),
        ToolKind::Axe | ToolKind::MeleeWeapon | ToolKind::Other => (ActionFamily::Custom, false),
    };
    if enabled || allow_listed {
        family
    } else {
        ActionFamily::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ItemStack;

    fn tool(kind: ToolKind, name: &str) -> Implement {
        Implement::Tool(Tool::new(kind, name))
    }

    fn tool_family(kind: ToolKind, name: &str, config: &TractorConfig) -> ActionFamily {
        classify(&tool(kind, name), config)
    }

    fn item(category: ItemCategory) -> Implement {
        Implement::Item(ItemStack {
            item_id: 472,
            category,
            stack: 5,
        })
    }

    #[test]
    fn scythe_harvests_when_enabled() {
        let config = TractorConfig::default();
        assert_eq!(
            tool_family(ToolKind::MeleeWeapon, "Golden Scythe", &config),
            ActionFamily::Harvesting
        );
        assert_eq!(tool_family(ToolKind::MeleeWeapon, "SCYTHE", &config), ActionFamily::Harvesting);
    }

    #[test]
    fn scythe_disabled_resolves_to_none() {
        let config = TractorConfig {
            scythe_harvests: false,
            ..TractorConfig::default()
        };
        assert_eq!(tool_family(ToolKind::MeleeWeapon, "Scythe", &config), ActionFamily::None);
    }

    #[test]
    fn scythe_disabled_ignores_allow_list() {
        let config = TractorConfig {
            scythe_harvests: false,
            custom_tools: vec!["Scythe".to_string()],
            ..TractorConfig::default()
        };
        assert_eq!(tool_family(ToolKind::MeleeWeapon, "Scythe", &config), ActionFamily::None);
    }

    #[test]
    fn plain_sword_is_none_unless_listed() {
        let config = TractorConfig::default();
        assert_eq!(tool_family(ToolKind::MeleeWeapon, "Rusty Sword", &config), ActionFamily::None);

        let config = TractorConfig {
            custom_tools: vec!["Rusty Sword".to_string()],
            ..TractorConfig::default()
        };
        assert_eq!(
            tool_family(ToolKind::MeleeWeapon, "Rusty Sword", &config),
            ActionFamily::Custom
        );
    }

    #[test]
    fn tool_kinds_map_to_families() {
        let config = TractorConfig::default();
        assert_eq!(
            tool_family(ToolKind::WateringCan, "Watering Can", &config),
            ActionFamily::Watering
        );
        assert_eq!(tool_family(ToolKind::Hoe, "Hoe", &config), ActionFamily::Tilling);
        assert_eq!(tool_family(ToolKind::Pickaxe, "Pickaxe", &config), ActionFamily::Clearing);
        assert_eq!(tool_family(ToolKind::Axe, "Axe", &config), ActionFamily::None);
    }

    #[test]
    fn disabled_flags_gate_tools() {
        let config = TractorConfig {
            watering_can_waters: false,
            hoe_tills_dirt: false,
            pickaxe_clears_dirt: false,
            pickaxe_breaks_rocks: false,
            pickaxe_breaks_flooring: false,
            ..TractorConfig::default()
        };
        assert_eq!(tool_family(ToolKind::WateringCan, "Watering Can", &config), ActionFamily::None);
        assert_eq!(tool_family(ToolKind::Hoe, "Hoe", &config), ActionFamily::None);
        assert_eq!(tool_family(ToolKind::Pickaxe, "Pickaxe", &config), ActionFamily::None);
    }

    #[test]
    fn any_pickaxe_flag_enables_clearing() {
        let config = TractorConfig {
            pickaxe_clears_dirt: false,
            pickaxe_breaks_rocks: false,
            pickaxe_breaks_flooring: true,
            ..TractorConfig::default()
        };
        assert_eq!(tool_family(ToolKind::Pickaxe, "Pickaxe", &config), ActionFamily::Clearing);
    }

    #[test]
    fn allow_list_bypasses_disabled_flag() {
        let config = TractorConfig {
            hoe_tills_dirt: false,
            custom_tools: vec!["Hoe".to_string()],
            ..TractorConfig::default()
        };
        assert_eq!(tool_family(ToolKind::Hoe, "Hoe", &config), ActionFamily::Tilling);
        assert_eq!(tool_family(ToolKind::Axe, "Axe", &config), ActionFamily::None);
    }

    #[test]
    fn seeds_and_fertilizer_plant() {
        let config = TractorConfig::default();
        let planting = ActionFamily::PlantingOrFertilizing;
        assert_eq!(classify(&item(ItemCategory::Seed), &config), planting);
        assert_eq!(classify(&item(ItemCategory::Fertilizer), &config), planting);
        let fish = item(ItemCategory::Other("fish".to_string()));
        assert_eq!(classify(&fish, &config), ActionFamily::None);
    }

    #[test]
    fn empty_hands_do_nothing() {
        assert_eq!(classify(&Implement::Empty, &TractorConfig::default()), ActionFamily::None);
    }

    #[test]
    fn classification_is_stable() {
        let config = TractorConfig::default();
        let implement = tool(ToolKind::Hoe, "Hoe");
        let first = classify(&implement, &config);
        for _ in 0..10 {
            assert_eq!(classify(&implement, &config), first);
        }
    }
}
