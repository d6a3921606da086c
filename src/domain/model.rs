use serde::Serialize;

/// One timed run of a car.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatResult {
    pub heat_number: u32,
    pub elapsed_time: f64,
    pub finish_place: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarEntry {
    pub car_number: u32,
    pub last_name: String,
    pub first_name: String,
    heats: Vec<HeatResult>,
}

impl CarEntry {
    pub(crate) fn new(car_number: u32, last_name: &str, first_name: &str) -> Self {
        Self {
            car_number,
            last_name: last_name.to_string(),
            first_name: first_name.to_string(),
            heats: Vec::new(),
        }
    }

    pub(crate) fn push_heat(&mut self, heat: HeatResult) {
        self.heats.push(heat);
    }

    pub fn heats(&self) -> &[HeatResult] {
        &self.heats
    }

    pub fn total_time(&self) -> f64 {
        self.heats.iter().map(|h| h.elapsed_time).sum()
    }
}

/// The cars of one group as raced by a single category, keyed by car number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupEntry {
    pub group_id: String,
    cars: Vec<CarEntry>,
}

impl GroupEntry {
    fn new(group_id: &str) -> Self {
        Self {
            group_id: group_id.to_string(),
            cars: Vec::new(),
        }
    }

    /// Name metadata is fixed the first time a car number is seen.
    pub(crate) fn car_or_insert(
        &mut self,
        car_number: u32,
        last_name: &str,
        first_name: &str,
    ) -> &mut CarEntry {
        let index = match self.cars.iter().position(|c| c.car_number == car_number) {
            Some(index) => index,
            None => {
                self.cars
                    .push(CarEntry::new(car_number, last_name, first_name));
                self.cars.len() - 1
            }
        };
        &mut self.cars[index]
    }

    pub fn car(&self, car_number: u32) -> Option<&CarEntry> {
        self.cars.iter().find(|c| c.car_number == car_number)
    }

    pub fn cars(&self) -> &[CarEntry] {
        &self.cars
    }

    pub fn car_count(&self) -> usize {
        self.cars.len()
    }

    /// Elapsed time summed over every heat of every car.
    pub fn cumulative_time(&self) -> f64 {
        self.cars.iter().map(CarEntry::total_time).sum()
    }
}

/// A team and the groups it competed in, in first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryEntry {
    pub name: String,
    groups: Vec<GroupEntry>,
}

impl CategoryEntry {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            groups: Vec::new(),
        }
    }

    pub(crate) fn group_or_insert(&mut self, group_id: &str) -> &mut GroupEntry {
        let index = match self.groups.iter().position(|g| g.group_id == group_id) {
            Some(index) => index,
            None => {
                self.groups.push(GroupEntry::new(group_id));
                self.groups.len() - 1
            }
        };
        &mut self.groups[index]
    }

    pub fn group(&self, group_id: &str) -> Option<&GroupEntry> {
        self.groups.iter().find(|g| g.group_id == group_id)
    }

    pub fn groups(&self) -> &[GroupEntry] {
        &self.groups
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

/// Parsed race results: category -> group -> car -> heats.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RaceRecord {
    round_label: String,
    observed_groups: Vec<String>,
    categories: Vec<CategoryEntry>,
}

impl RaceRecord {
    pub(crate) fn new(round_label: &str) -> Self {
        Self {
            round_label: round_label.to_string(),
            ..Self::default()
        }
    }

    pub(crate) fn category_or_insert(&mut self, name: &str) -> &mut CategoryEntry {
        let index = match self.categories.iter().position(|c| c.name == name) {
            Some(index) => index,
            None => {
                self.categories.push(CategoryEntry::new(name));
                self.categories.len() - 1
            }
        };
        &mut self.categories[index]
    }

    pub(crate) fn observe_group(&mut self, group_id: &str) {
        if !self.observed_groups.iter().any(|g| g == group_id) {
            self.observed_groups.push(group_id.to_string());
        }
    }

    /// Label of the extra header column naming the heat/round.
    pub fn round_label(&self) -> &str {
        &self.round_label
    }

    /// Every group id seen in the data, excluded groups included.
    pub fn observed_groups(&self) -> &[String] {
        &self.observed_groups
    }

    pub fn has_group(&self, group_id: &str) -> bool {
        self.observed_groups.iter().any(|g| g == group_id)
    }

    pub fn category(&self, name: &str) -> Option<&CategoryEntry> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn categories(&self) -> &[CategoryEntry] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Time a category earned in one group, or the placeholder for a group it never raced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "seconds", rename_all = "snake_case")]
pub enum GroupTime {
    Raced(f64),
    Penalty(f64),
}

impl GroupTime {
    pub fn seconds(&self) -> f64 {
        match *self {
            GroupTime::Raced(seconds) | GroupTime::Penalty(seconds) => seconds,
        }
    }

    pub fn is_penalty(&self) -> bool {
        matches!(self, GroupTime::Penalty(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupScore {
    pub group_id: String,
    pub time: GroupTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStanding {
    pub category: String,
    /// One entry per group in canonical group order.
    pub group_times: Vec<GroupScore>,
    pub raw_total: f64,
    pub adjusted_total: f64,
}

impl CategoryStanding {
    pub fn group_time(&self, group_id: &str) -> Option<GroupTime> {
        self.group_times
            .iter()
            .find(|g| g.group_id == group_id)
            .map(|g| g.time)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standings {
    pub group_order: Vec<String>,
    pub group_count: usize,
    pub disqualified: Vec<String>,
    standings: Vec<CategoryStanding>,
}

impl Standings {
    pub(crate) fn new(
        group_order: Vec<String>,
        group_count: usize,
        disqualified: Vec<String>,
        standings: Vec<CategoryStanding>,
    ) -> Self {
        Self {
            group_order,
            group_count,
            disqualified,
            standings,
        }
    }

    /// Standings in record order.
    pub fn standings(&self) -> &[CategoryStanding] {
        &self.standings
    }

    pub fn get(&self, category: &str) -> Option<&CategoryStanding> {
        self.standings.iter().find(|s| s.category == category)
    }

    /// Ascending by adjusted total; ties keep record order.
    pub fn ranking(&self) -> Vec<&CategoryStanding> {
        let mut ranked: Vec<&CategoryStanding> = self.standings.iter().collect();
        ranked.sort_by(|a, b| a.adjusted_total.total_cmp(&b.adjusted_total));
        ranked
    }

    pub fn len(&self) -> usize {
        self.standings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.standings.is_empty()
    }
}
