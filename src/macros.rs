// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression — works for literals, consts, or vars
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! skills {
    // Skill-map literal in canonical order:
    // skills![bat, bowl, keep, field, end, tech, power]
    ($bat:expr, $bowl:expr, $keep:expr, $field:expr, $end:expr, $tech:expr, $power:expr $(,)?) => {
        $crate::core::skills::SkillMap::new([$bat, $bowl, $keep, $field, $end, $tech, $power])
    };
    // Same value for every skill
    ($fill:expr; all) => {
        $crate::core::skills::SkillMap::splat($fill)
    };
}
