use super::record::ImageRatio;

/// Number of prompts in a full vision board.
pub const TOTAL_IMAGES: u32 = 49;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Portrait,
    Establishing,
    Editorial,
    CloseUp,
    Macro,
    Contextual,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Portrait => "Portrait Images",
            Category::Establishing => "Establishing Shots",
            Category::Editorial => "Editorial Vignettes",
            Category::CloseUp => "Close-Up Shots",
            Category::Macro => "Macro Shots",
            Category::Contextual => "Contextual Shots",
        }
    }

    pub fn content_rule(&self) -> &'static str {
        match self {
            Category::Portrait => {
                "Portraits of \"Me, a woman/man\". #1 establishes the environment, #2-3 show simple actions, #4-5 show passive or reflective states"
            }
            Category::Establishing => "Establishing shots of the places in the vision",
            Category::Editorial => "Editorial vignettes of everyday moments",
            Category::CloseUp => "Close-up shots of meaningful objects and details",
            Category::Macro => "Macro shots of textures and tiny details",
            Category::Contextual => "Contextual shots that place the vision in the wider world",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRule {
    pub start: u32,
    pub end: u32,
    pub category: Category,
    pub ratio: ImageRatio,
}

impl CategoryRule {
    const fn new(start: u32, end: u32, category: Category, ratio: ImageRatio) -> Self {
        Self {
            start,
            end,
            category,
            ratio,
        }
    }

    pub fn contains(&self, image_number: u32) -> bool {
        (self.start..=self.end).contains(&image_number)
    }
}

pub const CATEGORY_TABLE: [CategoryRule; 8] = [
    CategoryRule::new(1, 5, Category::Portrait, ImageRatio::Portrait),
    CategoryRule::new(6, 9, Category::Establishing, ImageRatio::Widescreen),
    CategoryRule::new(10, 10, Category::Editorial, ImageRatio::Landscape),
    CategoryRule::new(11, 18, Category::Editorial, ImageRatio::Portrait),
    CategoryRule::new(19, 19, Category::Editorial, ImageRatio::Landscape),
    CategoryRule::new(20, 31, Category::CloseUp, ImageRatio::Square),
    CategoryRule::new(32, 35, Category::Macro, ImageRatio::Square),
    CategoryRule::new(36, 49, Category::Contextual, ImageRatio::Landscape),
];

/// Elements every prompt must describe.
pub const PROMPT_CHECKLIST: [&str; 7] = [
    "Shot type and composition",
    "Subject (use \"Me, a woman/man\" for portraits)",
    "Environment details",
    "Key visual elements",
    "Mood and atmosphere",
    "Style (\"iPhone\")",
    "Lighting and color tones",
];

pub fn rule_for(image_number: u32) -> Option<&'static CategoryRule> {
    CATEGORY_TABLE.iter().find(|rule| rule.contains(image_number))
}

pub fn expected_ratio(image_number: u32) -> Option<ImageRatio> {
    rule_for(image_number).map(|rule| rule.ratio)
}
