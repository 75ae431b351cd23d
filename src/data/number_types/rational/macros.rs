/// Shorthand for creating a rational number, mostly in tests.
///
/// A single argument is read as a decimal literal, two arguments are a numerator and denominator.
#[macro_export]
macro_rules! R {
    ($text:literal) => {
        <$crate::data::number_types::rational::Rational as ::std::str::FromStr>::from_str(
            stringify!($text)
        ).expect("literal is not a valid rational")
    };
    ($numer:expr, $denom:expr) => {
        $crate::data::number_types::rational::Rational::new($numer, $denom)
    };
}
