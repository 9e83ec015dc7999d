use std::fmt;

/// Ordered label -> display string store for the on-screen statistics.
///
/// Entries iterate in insertion order; updating an existing label keeps its
/// position so overlay lines do not jump around between frames.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatisticsOverlay {
    entries: Vec<(String, String)>,
}

impl StatisticsOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update an entry.
    pub fn set(&mut self, label: impl Into<String>, value: impl fmt::Display) {
        let label = label.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some((_, v)) => *v = value,
            None => self.entries.push((label, value)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, label: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(l, _)| l == label)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }

    /// One formatted line per entry, in iteration order.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.iter().map(|(l, v)| format!("{l}: {v}"))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Display for StatisticsOverlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in self.iter() {
            writeln!(f, "{label}: {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterates_in_insertion_order() {
        let mut stats = StatisticsOverlay::new();
        stats.set("FPS", 60);
        stats.set("Memory", "512 KiB");
        stats.set("Camera", "(0.0, 1.0, 2.0)");
        let labels: Vec<_> = stats.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, ["FPS", "Memory", "Camera"]);
    }

    #[test]
    fn update_keeps_position() {
        let mut stats = StatisticsOverlay::new();
        stats.set("FPS", 60);
        stats.set("Memory", "1 KiB");
        stats.set("FPS", 59);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats.get("FPS"), Some("59"));
        assert_eq!(stats.lines().next().as_deref(), Some("FPS: 59"));
    }

    #[test]
    fn remove_and_missing() {
        let mut stats = StatisticsOverlay::new();
        stats.set("a", 1);
        assert_eq!(stats.remove("a"), Some("1".to_string()));
        assert_eq!(stats.remove("a"), None);
        assert!(stats.get("a").is_none());
        assert!(stats.is_empty());
    }

    #[test]
    fn display_one_line_per_entry() {
        let mut stats = StatisticsOverlay::new();
        stats.set("FPS", 30);
        stats.set("Triangles", 2);
        assert_eq!(stats.to_string(), "FPS: 30\nTriangles: 2\n");
    }
}
