/*! Text cleaning

Conversion of irregular CMS markup into plain text.

- [normalize] turns a markup-ridden string into clean plain text,
  keeping only paragraph and list breaks.
- [flatten] serializes a nested rich-text body tree into a single
  marked-up string that [normalize] then cleans.
!*/
pub mod flatten;
pub mod normalize;

pub use flatten::flatten;
pub use normalize::normalize;
