/// Fixed qualitative observations printed at the end of a run. This is a
/// narrative template, not derived from the computed statistics.
pub const KEY_OBSERVATIONS: [&str; 5] = [
    "last_review and reviews_per_month are empty for listings that never \
     received a review, so their missing counts track review activity rather \
     than data collection gaps.",
    "Prices are heavily right-skewed: most listings sit well under $200 a \
     night while a thin tail stretches into the thousands, which is why the \
     distribution is shown on a log axis.",
    "Entire homes/apartments command the highest typical price, private rooms \
     sit in the middle, and shared rooms are the cheapest room type.",
    "minimum_nights has extreme outliers (stays of a year or more); the bulk \
     of listings require only a few nights.",
    "Listings cluster densely in Manhattan and Brooklyn, with far sparser \
     coverage across Queens, the Bronx and Staten Island.",
];

/// Print the observations to stdout, numbered.
pub fn print_observations() {
    println!("\n--- Key Observations ---");
    for (i, obs) in KEY_OBSERVATIONS.iter().enumerate() {
        println!("{}. {}", i + 1, obs);
    }
}
