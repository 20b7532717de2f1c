use rust_decimal::Decimal;

pub fn team_value<I>(prices: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    prices.into_iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_roster_is_worth_nothing() {
        assert_eq!(team_value(Vec::new()), Decimal::ZERO);
    }

    #[test]
    fn test_prices_are_summed_exactly() {
        assert_eq!(team_value(vec![dec!(5.5), dec!(7.0)]), dec!(12.5));
        assert_eq!(team_value(vec![dec!(4.1), dec!(4.1), dec!(4.1)]), dec!(12.3));
    }
}
