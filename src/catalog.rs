/// Disease catalog
///
/// The fixed set of disease records that a simulated analysis can return.
/// Records are static and never change at runtime.

/// A single disease entry, keyed by its name in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiseaseRecord {
    /// Short explanation shown under the disease name
    pub description: &'static str,
    /// Severity in percent (0-100), drives the severity bar and label
    pub severity: u8,
    /// Recommended treatment text
    pub treatment: &'static str,
    /// Prevention steps, in display order
    pub prevention: &'static [&'static str],
    /// Confidence score in percent (0-100)
    pub confidence: u8,
}

const ENTRIES: [(&str, DiseaseRecord); 5] = [
    (
        "Tomato Early Blight",
        DiseaseRecord {
            description: "Fungal disease causing dark spots with concentric rings on older leaves.",
            severity: 65,
            treatment: "Apply fungicides containing chlorothalonil or copper-based solutions. Remove infected leaves. Rotate crops annually.",
            prevention: &[
                "Avoid overhead watering",
                "Ensure proper plant spacing",
                "Remove plant debris",
                "Use resistant varieties",
            ],
            confidence: 92,
        },
    ),
    (
        "Potato Late Blight",
        DiseaseRecord {
            description: "Destructive fungal disease causing water-soaked lesions on leaves and stems.",
            severity: 80,
            treatment: "Apply fungicides like mancozeb or metalaxyl immediately. Destroy infected plants.",
            prevention: &[
                "Plant certified disease-free seed potatoes",
                "Improve drainage",
                "Monitor weather conditions",
                "Avoid working in wet fields",
            ],
            confidence: 88,
        },
    ),
    (
        "Apple Scab",
        DiseaseRecord {
            description: "Fungal disease causing olive-green to black spots on leaves and fruit.",
            severity: 45,
            treatment: "Apply sulfur or captan fungicides during growing season. Prune to improve air circulation.",
            prevention: &[
                "Rake and destroy fallen leaves",
                "Apply dormant sprays",
                "Plant resistant varieties",
                "Maintain tree health",
            ],
            confidence: 95,
        },
    ),
    (
        "Grape Black Rot",
        DiseaseRecord {
            description: "Fungal infection causing circular brown spots with black fruiting bodies.",
            severity: 70,
            treatment: "Apply fungicides containing myclobutanil or trifloxystrobin before and after bloom.",
            prevention: &[
                "Prune for good air circulation",
                "Remove mummified fruit",
                "Avoid overhead irrigation",
                "Sanitize pruning tools",
            ],
            confidence: 85,
        },
    ),
    (
        "Healthy Leaf",
        DiseaseRecord {
            description: "No significant disease detected. Plant appears healthy.",
            severity: 5,
            treatment: "Continue regular monitoring. Maintain proper watering and fertilization schedule.",
            prevention: &[
                "Regular inspection",
                "Balanced fertilization",
                "Proper irrigation",
                "Weed control",
            ],
            confidence: 98,
        },
    ),
];

/// Read-only lookup table of named disease records
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    entries: &'static [(&'static str, DiseaseRecord)],
}

impl Catalog {
    /// The built-in catalog of five records
    pub fn builtin() -> Self {
        Self { entries: &ENTRIES }
    }

    /// Look up a record by its name
    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&'static DiseaseRecord> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, record)| record)
    }

    /// Entry at `index` in key order
    pub fn entry(&self, index: usize) -> Option<(&'static str, &'static DiseaseRecord)> {
        self.entries.get(index).map(|(key, record)| (*key, record))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(catalog: &Catalog) -> Vec<&'static str> {
        (0..catalog.len())
            .filter_map(|index| catalog.entry(index))
            .map(|(name, _)| name)
            .collect()
    }

    #[test]
    fn test_builtin_has_five_records() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 5);
        assert_eq!(
            names(&catalog),
            vec![
                "Tomato Early Blight",
                "Potato Late Blight",
                "Apple Scab",
                "Grape Black Rot",
                "Healthy Leaf",
            ]
        );
    }

    #[test]
    fn test_lookup() {
        let catalog = Catalog::builtin();
        let scab = catalog.get("Apple Scab").unwrap();
        assert_eq!(scab.severity, 45);
        assert_eq!(scab.confidence, 95);
        assert_eq!(scab.prevention.len(), 4);

        assert!(catalog.get("Corn Rust").is_none());
    }

    #[test]
    fn test_values_are_percentages() {
        let catalog = Catalog::builtin();
        for name in names(&catalog) {
            let record = catalog.get(name).unwrap();
            assert!(record.severity <= 100, "{name} severity out of range");
            assert!(record.confidence <= 100, "{name} confidence out of range");
        }
    }
}
