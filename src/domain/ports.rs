/// Scoring parameters consumed by the standings engine.
pub trait ConfigProvider {
    fn excluded_groups(&self) -> &[String];
    fn dropped_groups(&self) -> usize;
    fn cars_per_group(&self) -> usize;
    fn lane_count(&self) -> usize;
}
