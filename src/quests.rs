use crate::model::{Chapter, GameState, QuestDef, QuestRequirement, ResourceKind, StoryData};
use crate::util::format_number;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuestProgress {
    /// 0..=100
    pub percent: f64,
    pub text: String,
}

fn ratio(current: f64, needed: f64) -> f64 {
    if needed > 0.0 { (current / needed).max(0.0) } else { 0.0 }
}

fn percent(ratio: f64) -> f64 {
    (ratio * 100.0).min(100.0)
}

fn required_resources(req: &QuestRequirement) -> Vec<(ResourceKind, f64)> {
    ResourceKind::ALL
        .into_iter()
        .filter_map(|k| req.resources.get(k).filter(|v| *v > 0.0).map(|v| (k, v)))
        .collect()
}

/// One-line summary of what a quest asks for. Only the first kind of
/// requirement present is described.
pub fn format_requirement(req: &QuestRequirement, story: &StoryData) -> String {
    if let Some(clicks) = req.total_clicks.filter(|c| *c > 0.0) {
        return format!("Requires {} clicks", format_number(clicks));
    }
    let resources = required_resources(req);
    if !resources.is_empty() {
        let needs: Vec<String> = resources
            .iter()
            .map(|(k, v)| format!("{} {}", format_number(*v), k.label()))
            .collect();
        return format!("Deliver: {}", needs.join(", "));
    }
    if let Some(buildings) = &req.buildings {
        let names: Vec<&str> = buildings.iter().map(|b| story.building_name(b)).collect();
        return format!("Build: {}", names.join(", "));
    }
    if let Some(count) = req.equipment_count.filter(|c| *c > 0) {
        return format!("Own {count} pieces of equipment.");
    }
    if let Some(owned) = &req.equipment_owned {
        let parts: Vec<String> = owned
            .iter()
            .map(|(id, count)| format!("{count}× {}", story.equipment_name(id)))
            .collect();
        return format!("Obtain: {}", parts.join(", "));
    }
    String::new()
}

pub fn progress(req: &QuestRequirement, state: &GameState, story: &StoryData) -> QuestProgress {
    if let Some(needed) = req.total_clicks.filter(|c| *c > 0.0) {
        let current = state.total_clicks as f64;
        return QuestProgress {
            percent: percent(ratio(current, needed)),
            text: format!("{} / {} clicks", format_number(current), format_number(needed)),
        };
    }
    if let Some(needed) = req.equipment_count.filter(|c| *c > 0) {
        let have = state.total_equipment();
        return QuestProgress {
            percent: percent(ratio(have as f64, needed as f64)),
            text: format!("{have} / {needed} equipment"),
        };
    }
    if let Some(owned) = req.equipment_owned.as_ref().filter(|m| !m.is_empty()) {
        let count = |id: &str| state.equipment_counts.get(id).copied().unwrap_or(0);
        let min_ratio = owned
            .iter()
            .map(|(id, needed)| ratio(count(id.as_str()) as f64, *needed as f64))
            .fold(f64::INFINITY, f64::min);
        let parts: Vec<String> = owned
            .iter()
            .map(|(id, needed)| format!("{} / {} × {}", count(id.as_str()), needed, story.equipment_name(id)))
            .collect();
        return QuestProgress {
            percent: percent(min_ratio),
            text: parts.join(", "),
        };
    }
    if let Some(buildings) = req.buildings.as_ref().filter(|b| !b.is_empty()) {
        let built = buildings.iter().filter(|b| state.building_level(b) > 0).count();
        return QuestProgress {
            percent: percent(ratio(built as f64, buildings.len() as f64)),
            text: format!("{built} / {} buildings", buildings.len()),
        };
    }
    let resources = required_resources(req);
    if !resources.is_empty() {
        let min_ratio = resources
            .iter()
            .map(|(k, v)| ratio(state.resources.get(*k), *v))
            .fold(f64::INFINITY, f64::min);
        let parts: Vec<String> = resources
            .iter()
            .map(|(k, v)| {
                format!("{} / {} {}", format_number(state.resources.get(*k)), format_number(*v), k.label())
            })
            .collect();
        return QuestProgress {
            percent: percent(min_ratio),
            text: parts.join(", "),
        };
    }
    QuestProgress::default()
}

/// Story quests first, then optional side quests, each group in chapter order.
pub fn ordered_quests(chapter: &Chapter) -> Vec<&QuestDef> {
    let (optional, story): (Vec<&QuestDef>, Vec<&QuestDef>) = chapter.quests.iter().partition(|q| q.optional);
    story.into_iter().chain(optional).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BuildingDef, EquipmentDef, ResourcePayload};
    use std::collections::BTreeMap;

    fn quest(id: &str, optional: bool) -> QuestDef {
        QuestDef { id: id.into(), name: id.into(), optional, ..Default::default() }
    }

    fn story() -> StoryData {
        let mut s = StoryData::default();
        s.buildings.insert("workshop".into(), BuildingDef { name: "Workshop".into(), ..Default::default() });
        s.equipment.insert("katana".into(), EquipmentDef { name: "Rusty Katana".into(), ..Default::default() });
        s
    }

    #[test]
    fn click_requirement() {
        let req = QuestRequirement { total_clicks: Some(250.0), ..Default::default() };
        let mut state = GameState::default();
        state.total_clicks = 100;
        let p = progress(&req, &state, &story());
        assert!((p.percent - 40.0).abs() < 1e-9);
        assert_eq!(p.text, "100.0 / 250.0 clicks");
        assert_eq!(format_requirement(&req, &story()), "Requires 250.0 clicks");

        state.total_clicks = 900;
        assert_eq!(progress(&req, &state, &story()).percent, 100.0);
    }

    #[test]
    fn resource_requirement_uses_weakest_ratio() {
        let req = QuestRequirement {
            resources: ResourcePayload { gooncoins: Some(100.0), astma: Some(10.0), ..Default::default() },
            ..Default::default()
        };
        let mut state = GameState::default();
        state.resources.gooncoins = 80.0;
        state.resources.astma = 2.0;
        let p = progress(&req, &state, &story());
        assert!((p.percent - 20.0).abs() < 1e-9);
        assert_eq!(p.text, "80.0 / 100.0 Gooncoins, 2.0 / 10.0 Astma");
        assert_eq!(format_requirement(&req, &story()), "Deliver: 100.0 Gooncoins, 10.0 Astma");
    }

    #[test]
    fn building_and_equipment_requirements() {
        let s = story();
        let mut state = GameState::default();
        let build = QuestRequirement { buildings: Some(vec!["workshop".into(), "market".into()]), ..Default::default() };
        assert_eq!(format_requirement(&build, &s), "Build: Workshop, market");
        state.buildings.insert("workshop".into(), 1);
        assert_eq!(progress(&build, &state, &s).percent, 50.0);

        let mut owned = BTreeMap::new();
        owned.insert("katana".to_string(), 4);
        let gear = QuestRequirement { equipment_owned: Some(owned), ..Default::default() };
        state.equipment_counts.insert("katana".into(), 1);
        let p = progress(&gear, &state, &s);
        assert_eq!(p.percent, 25.0);
        assert_eq!(p.text, "1 / 4 × Rusty Katana");
        assert_eq!(format_requirement(&gear, &s), "Obtain: 4× Rusty Katana");

        let count = QuestRequirement { equipment_count: Some(3), ..Default::default() };
        state.equipment_counts.insert("helmet".into(), 1);
        assert_eq!(progress(&count, &state, &s).text, "2 / 3 equipment");
    }

    #[test]
    fn empty_requirement_has_no_progress() {
        let p = progress(&QuestRequirement::default(), &GameState::default(), &story());
        assert_eq!(p, QuestProgress::default());
        assert_eq!(format_requirement(&QuestRequirement::default(), &story()), "");
    }

    #[test]
    fn optional_quests_come_last() {
        let chapter = Chapter {
            quests: vec![quest("a", false), quest("side", true), quest("b", false)],
            ..Default::default()
        };
        let ids: Vec<&str> = ordered_quests(&chapter).iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "side"]);
    }
}
