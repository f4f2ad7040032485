//! Class label table and display categories for the 36-class classifier.

use serde::Serialize;
use std::fmt;

pub const LABEL_COUNT: usize = 36;

/// Class names in the order the model emits its scores.
pub const LABELS: [&str; LABEL_COUNT] = [
    "apple",
    "banana",
    "beetroot",
    "bell pepper",
    "cabbage",
    "capsicum",
    "carrot",
    "cauliflower",
    "chilli pepper",
    "corn",
    "cucumber",
    "eggplant",
    "garlic",
    "ginger",
    "grapes",
    "jalepeno",
    "kiwi",
    "lemon",
    "lettuce",
    "mango",
    "onion",
    "orange",
    "paprika",
    "pear",
    "peas",
    "pineapple",
    "pomegranate",
    "potato",
    "raddish",
    "soy beans",
    "spinach",
    "sweetcorn",
    "sweetpotato",
    "tomato",
    "turnip",
    "watermelon",
];

pub const FRUITS: [&str; 15] = [
    "Apple",
    "Banana",
    "Bell Pepper",
    "Chilli Pepper",
    "Grapes",
    "Jalepeno",
    "Kiwi",
    "Lemon",
    "Mango",
    "Orange",
    "Paprika",
    "Pear",
    "Pineapple",
    "Pomegranate",
    "Watermelon",
];

pub const VEGETABLES: [&str; 20] = [
    "Beetroot",
    "Cabbage",
    "Capsicum",
    "Carrot",
    "Cauliflower",
    "Corn",
    "Cucumber",
    "Eggplant",
    "Ginger",
    "Lettuce",
    "Onion",
    "Peas",
    "Potato",
    "Raddish",
    "Soy Beans",
    "Spinach",
    "Sweetcorn",
    "Sweetpotato",
    "Tomato",
    "Turnip",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Fruit,
    Vegetable,
}

impl Category {
    /// Display category of a resolved label.
    ///
    /// Anything that is not a known vegetable is shown as a fruit, including
    /// labels that appear in neither set (garlic).
    pub fn of(label: &str) -> Self {
        if contains(&VEGETABLES, label) {
            Category::Vegetable
        } else {
            Category::Fruit
        }
    }

    /// Whether `label` belongs to either category set.
    pub fn is_known(label: &str) -> bool {
        contains(&VEGETABLES, label) || contains(&FRUITS, label)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Fruit => "FRUIT",
            Category::Vegetable => "VEGETABLE",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn contains(set: &[&str], label: &str) -> bool {
    set.iter().any(|name| name.eq_ignore_ascii_case(label))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelEntry {
    pub index: usize,
    pub label: String,
    pub category: Category,
}

pub fn label_entries() -> Vec<LabelEntry> {
    (0..LABEL_COUNT)
        .filter_map(|index| {
            label_for(index).map(|label| LabelEntry {
                index,
                category: Category::of(&label),
                label,
            })
        })
        .collect()
}

/// Capitalized label for a class index.
pub fn label_for(index: usize) -> Option<String> {
    LABELS.get(index).map(|name| capitalize(name))
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Index and score of the highest score. Ties go to the lowest index and NaN
/// never wins.
pub fn argmax(scores: &[f32]) -> Option<(usize, f32)> {
    scores
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, score)| !score.is_nan())
        .reduce(|best, current| if current.1 > best.1 { current } else { best })
}

pub fn resolve(scores: &[f32]) -> Option<(usize, String)> {
    let (index, _) = argmax(scores)?;
    label_for(index).map(|label| (index, label))
}
