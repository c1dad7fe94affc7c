use std::collections::HashSet;

use serde::Serialize;

use crate::dataset::{Dataset, DistrictNumber, Feature};

/// One selectable district.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DistrictEntry {
    pub name: String,
    pub number: DistrictNumber,
}

impl DistrictEntry {
    #[inline] pub fn numeric(&self) -> u32 { self.number.numeric() }

    #[inline] pub fn label(&self) -> &str { self.number.label() }

    /// Text shown on the selector button.
    pub fn display(&self) -> String {
        let label = self.label();
        if label.is_empty() { self.name.clone() } else { format!("{} {}", self.name, label) }
    }

    /// Case-insensitive match against name, numeric id and displayed label.
    pub fn matches(&self, search_text: &str) -> bool {
        let needle = search_text.trim().to_lowercase();
        if needle.is_empty() { return true }
        self.name.to_lowercase().contains(&needle)
            || self.numeric().to_string().contains(&needle)
            || self.display().to_lowercase().contains(&needle)
    }
}

/// Districts named by board or completed-board features, sorted by numeric id.
/// The first feature seen for a district defines its number. Sorting is
/// stable, so ties and unparseable ids (0) keep file order.
pub fn list_districts(dataset: &Dataset) -> Vec<DistrictEntry> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for feature in dataset.features() {
        let (name, number) = match feature {
            Feature::Board(b) => (&b.district, &b.district_number),
            Feature::CompletedBoard(b) => (&b.district, &b.district_number),
            _ => continue,
        };
        if seen.insert(name.as_str()) {
            entries.push(DistrictEntry { name: name.clone(), number: number.clone() });
        }
    }

    entries.sort_by_key(DistrictEntry::numeric);
    entries
}

/// Entries matching the search box; empty text matches everything.
pub fn filter_districts<'a>(entries: &'a [DistrictEntry], search_text: &str) -> Vec<&'a DistrictEntry> {
    entries.iter().filter(|e| e.matches(search_text)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, number: &str) -> DistrictEntry {
        DistrictEntry { name: name.into(), number: DistrictNumber::new(number) }
    }

    #[test]
    fn display_strips_affixes() {
        assert_eq!(entry("Inzai North", "第3投票区").display(), "Inzai North 3");
        assert_eq!(entry("Nameless", "").display(), "Nameless");
    }

    #[test]
    fn search_is_case_insensitive_over_all_fields() {
        let entries = vec![entry("Kita", "第1投票区"), entry("Minami", "第12投票区"), entry("Higashi", "第3投票区")];
        assert_eq!(filter_districts(&entries, "").len(), 3);
        assert_eq!(filter_districts(&entries, "  ").len(), 3);
        assert_eq!(filter_districts(&entries, "KITA")[0].name, "Kita");
        let by_number: Vec<_> = filter_districts(&entries, "12").iter().map(|e| e.name.as_str()).collect();
        assert_eq!(by_number, ["Minami"]);
        assert_eq!(filter_districts(&entries, "1").len(), 2);
        assert!(filter_districts(&entries, "nowhere").is_empty());
    }
}
