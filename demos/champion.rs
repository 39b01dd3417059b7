//! Champion example: a level 18 champion with a full build
//!
//! This example demonstrates:
//! - Building a champion from a cleaned stat record
//! - Levelling it up
//! - Turning merged item records into bonuses
//! - Reading derived stats and resistances against an attacker
//!
//! Run with `cargo run --example champion`. No network access is needed.

use riftstat::*;
use serde_json::json;

fn main() -> Result<(), StatError> {
    // Cleaned stat record, as the data layer stores it per champion
    let record = json!({
        "hp": 620.0, "hpperlevel": 99.0,
        "hpregen": 7.5, "hpregenperlevel": 0.55,
        "armor": 37.0, "armorperlevel": 4.7,
        "spellblock": 32.0, "spellblockperlevel": 2.05,
        "attackspeedratio": 0.658,
        "attackspeed": 0.658, "attackspeedperlevel": 3.0,
        "attackdamage": 66.0, "attackdamageperlevel": 3.5,
        "mp": 330.0, "mpperlevel": 65.0,
        "mpregen": 8.0, "mpregenperlevel": 0.65,
        "attackrange": 175.0,
        "movespeed": 340.0,
        "partype": "Mana",
        "rangeidentity": ["Melee"]
    });

    let mut champion = Champion::from_record("Wukong", &record)?;
    println!("{} at level {}:", champion.name(), champion.level());
    println!("  health {:.1}, armor {:.1}", champion.stats().health, champion.stats().armor);

    champion.set_level(18)?;
    println!("\n{} at level {}:", champion.name(), champion.level());
    println!("  health {:.1}, armor {:.1}", champion.stats().health, champion.stats().armor);

    // Merged item records carry their stats under `stats`
    let items = [
        json!({"name": "Black Cleaver", "stats": {
            "mFlatHPPoolMod": 400.0, "mFlatPhysicalDamageMod": 40.0, "mAbilityHasteMod": 20.0
        }}),
        json!({"name": "Sterak's Gage", "stats": {"mFlatHPPoolMod": 400.0}}),
        json!({"name": "Plated Steelcaps", "stats": {
            "mFlatArmorMod": 25.0, "mFlatMovementSpeedMod": 45.0
        }}),
        json!({"name": "Mercury's Treads", "stats": {
            "mFlatSpellBlockMod": 25.0, "mPercentTenacityItemMod": 0.3
        }}),
        json!({"name": "Phantom Dancer", "stats": {
            "mPercentAttackSpeedMod": 0.6, "mFlatCritChanceMod": 0.25
        }}),
    ];

    println!("\nItems:");
    for item in &items {
        println!("  - {}", item["name"].as_str().unwrap_or("?"));
    }
    champion.set_bonuses(StatBonuses::from_items(&items));

    let stats = champion.stats();
    println!("\n=== Level 18 with items ===");
    println!("Health:        {:>8.1} (+{:.1})", stats.health, stats.health_bonus);
    println!("Armor:         {:>8.1} (+{:.1})", stats.armor, stats.armor_bonus);
    println!("Magic resist:  {:>8.1} (+{:.1})", stats.magic_resist, stats.magic_resist_bonus);
    println!("Attack damage: {:>8.1} (+{:.1})", stats.attack_damage, stats.attack_damage_bonus);
    println!("Attack speed:  {:>8.3}", stats.attack_speed);
    println!("Crit chance:   {:>7.0}%", stats.crit_chance * 100.0);
    println!("Move speed:    {:>8.1}", stats.move_speed);
    println!("Ability haste: {:>8.0}", stats.ability_haste);
    println!("Tenacity:      {:>7.0}%", stats.tenacity * 100.0);
    println!("Avg per hit:   {:>8.1}", champion.avg_damage_per_attack());

    // The same champion seen by an attacker with lethality and armor pen
    let mut attacker = Champion::from_record("Attacker", &record)?;
    attacker.set_level(18)?;
    attacker.add_bonus(Bonus::on(BonusStat::ArmorPenFlat).value(18.0));
    attacker.add_bonus(Bonus::on(BonusStat::ArmorPenPercent).percent_points(30.0));

    let (base, bonus, total) = champion.armor_against(&attacker);
    println!("\nArmor against attacker: {base:.1} + {bonus:.1} = {total:.1}");
    println!(
        "Physical damage reduction: {:.1}%",
        champion.physical_damage_reduction(&attacker) * 100.0
    );
    println!(
        "Effective health: {:.0} physical, {:.0} magic",
        champion.effective_health_physical(),
        champion.effective_health_magic()
    );

    Ok(())
}
