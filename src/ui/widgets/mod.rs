pub mod button;
pub mod tweets;

pub use button::GenerateButton;
pub use tweets::TweetSection;
