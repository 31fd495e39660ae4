//! Search topics for each catalog entry.

use super::EntryKey;

/// Topic used for a day outside the curriculum table.
pub const DEFAULT_DAY_TOPIC: &str = "arabic language lesson tutorial";

/// Topic used for a category outside the supplementary table.
pub const DEFAULT_CATEGORY_TOPIC: &str = "arabic supplementary lesson tutorial";

/// Get the video search topic for an entry.
pub fn topic_for(key: &EntryKey) -> &'static str {
    match key {
        EntryKey::Day(day) => day_topic(*day),
        EntryKey::Category(name) => category_topic(name),
    }
}

fn day_topic(day: u32) -> &'static str {
    match day {
        // Foundations
        1 => "arabic alphabet pronunciation lesson tutorial",
        2 => "arabic numbers counting lesson tutorial",
        3 => "arabic time expressions lesson tutorial",
        4 => "arabic basic verbs actions lesson tutorial",
        5 => "arabic basic adjectives lesson tutorial",
        6 => "arabic question words lesson tutorial",
        7 => "arabic alphabet diacritics lesson tutorial",

        // Essential daily phrases
        8 => "arabic shopping transportation phrases lesson tutorial",
        9 => "arabic dining restaurant phrases lesson tutorial",
        10 => "arabic directions navigation phrases lesson tutorial",
        11 => "arabic basic grammar patterns lesson tutorial",
        12 => "arabic travel survival phrases lesson tutorial",
        13 => "arabic public transport phrases lesson tutorial",
        14 => "arabic daily communication phrases lesson tutorial",

        // Culture and daily life
        15 => "arabic family relationships vocabulary lesson tutorial",
        16 => "arabic social interactions phrases lesson tutorial",
        17 => "arab etiquette culture lesson tutorial",
        18 => "arab festivals traditions lesson tutorial",
        19 => "arabic home life vocabulary lesson tutorial",
        20 => "arabic public places vocabulary lesson tutorial",
        21 => "arab cultural customs lesson tutorial",
        22 => "arab social norms lesson tutorial",

        // Professional communication
        23 => "arabic workplace vocabulary lesson tutorial",
        24 => "arab business etiquette lesson tutorial",
        25 => "arabic online meetings phrases lesson tutorial",
        26 => "arabic remote work vocabulary lesson tutorial",
        27 => "arabic email writing phrases lesson tutorial",
        28 => "arabic presentations phrases lesson tutorial",
        29 => "arabic technical terms vocabulary lesson tutorial",
        30 => "arab professional conduct lesson tutorial",

        // Advanced fluency
        31 => "arabic idioms expressions lesson tutorial",
        32 => "arabic formal expressions lesson tutorial",
        33 => "arabic casual slang lesson tutorial",
        34 => "arabic debate discussion phrases lesson tutorial",
        35 => "arabic storytelling phrases lesson tutorial",
        36 => "arabic persuasive speech lesson tutorial",
        37 => "arabic advanced dialogue lesson tutorial",
        38 => "arabic role play scenarios lesson tutorial",
        39 => "arabic complex conversations lesson tutorial",
        40 => "arabic fluent communication lesson tutorial",

        _ => DEFAULT_DAY_TOPIC,
    }
}

fn category_topic(name: &str) -> &'static str {
    match name {
        "education" => "arabic academic vocabulary lesson tutorial",
        "hobbies" => "arabic hobbies interests vocabulary lesson tutorial",
        "emotions" => "arabic expressing emotions vocabulary lesson tutorial",
        "daily_life" => "arabic daily life vocabulary lesson tutorial",
        "comparisons" => "arabic making comparisons grammar lesson tutorial",
        _ => DEFAULT_CATEGORY_TOPIC,
    }
}
