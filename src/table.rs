//! Fixed-width table rendering for the car listing.
//!
//! Every cell is left-justified to [`COLUMN_WIDTH`] characters and cells are
//! joined with `"| "`. Longer values are printed in full, which pushes the
//! following columns to the right.

use crate::model::Car;

pub const COLUMN_WIDTH: usize = 20;
pub const SEPARATOR: &str = "| ";
pub const EMPTY_DATABASE: &str = "*** Database is empty ***";

const HEADER_COLUMNS: [&str; 5] = ["id", "brand", "model", "production_year", "convertible"];

fn render_row<I, S>(cells: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    cells
        .into_iter()
        .map(|cell| format!("{:<width$}", cell.as_ref(), width = COLUMN_WIDTH))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

pub fn header() -> String {
    render_row(HEADER_COLUMNS)
}

pub fn car_row(car: &Car) -> String {
    render_row([
        car.id.to_string(),
        car.details.brand.clone(),
        car.details.model.clone(),
        car.details.production_year.to_string(),
        car.details.convertible.to_string(),
    ])
}

/// Lines to print for a listing: the empty-database notice alone, or the
/// header followed by one row per car.
pub fn render(cars: &[Car]) -> Vec<String> {
    if cars.is_empty() {
        return vec![EMPTY_DATABASE.to_string()];
    }
    std::iter::once(header())
        .chain(cars.iter().map(car_row))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CarDetails, CarId};

    fn car(id: u64, brand: &str, model: &str, year: u16, convertible: bool) -> Car {
        Car {
            id: CarId::new(id).unwrap(),
            details: CarDetails {
                brand: brand.into(),
                model: model.into(),
                production_year: year,
                convertible,
            },
        }
    }

    #[test]
    fn empty_listing_is_a_single_notice() {
        assert_eq!(render(&[]), vec!["*** Database is empty ***".to_string()]);
    }

    #[test]
    fn header_is_padded_and_separated() {
        let expected = format!(
            "{:<20}| {:<20}| {:<20}| {:<20}| {:<20}",
            "id", "brand", "model", "production_year", "convertible"
        );
        assert_eq!(header(), expected);
        assert_eq!(header().len(), 5 * 20 + 4 * 2);
    }

    #[test]
    fn one_row_per_car_in_order() {
        let cars = vec![
            car(2, "Porsche", "356", 1950, true),
            car(1, "Volvo", "P1800", 1961, false),
        ];
        let lines = render(&cars);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("2                   | Porsche"));
        assert!(lines[2].starts_with("1                   | Volvo"));
        // Booleans use the JSON spelling, not `True`/`False`.
        assert!(lines[1].ends_with(&format!("{:<20}", "true")));
        assert!(lines[2].ends_with(&format!("{:<20}", "false")));
    }

    #[test]
    fn long_values_are_not_truncated() {
        let row = car_row(&car(1, "Aston Martin Lagonda Ltd", "DB5", 1963, false));
        assert!(row.contains("Aston Martin Lagonda Ltd| DB5"));
    }
}
