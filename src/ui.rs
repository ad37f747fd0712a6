// UI layer: the numbered menu loop and the flows behind each entry.
// The functions are small and synchronous; every HTTP call happens between
// two prompts and its outcome is printed before the menu comes back.

use crate::api::{ApiError, CarsClient, Listing, Reply};
use crate::model::{CarDetails, CarId, NewCar};
use crate::prompt::{ask, ask_once, Answer, LineSource, Screen};
use crate::table;
use crate::validate::{parse_convertible, parse_id, parse_name, parse_production_year};
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

const CHOICE_PROMPT: &str = "Enter your choice (0..4)";
const ID_PROMPT: &str = "Car ID (empty string to exit)";
const BRAND_PROMPT: &str = "Car brand (empty string to exit)";
const MODEL_PROMPT: &str = "Car model (empty string to exit)";
const YEAR_PROMPT: &str = "Car production year (empty string to exit)";
const CONVERTIBLE_PROMPT: &str = "Is this car convertible? [y/n] (empty string to exit)";

/// Menu entries, keyed by the digit the operator types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Exit,
    List,
    Add,
    Delete,
    Update,
}

impl MenuChoice {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "0" => Some(MenuChoice::Exit),
            "1" => Some(MenuChoice::List),
            "2" => Some(MenuChoice::Add),
            "3" => Some(MenuChoice::Delete),
            "4" => Some(MenuChoice::Update),
            _ => None,
        }
    }
}

/// Why the menu loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The operator chose `0`.
    Quit,
    /// The connectivity probe failed.
    ServerDown,
}

impl Exit {
    pub fn code(self) -> u8 {
        match self {
            Exit::Quit => 0,
            Exit::ServerDown => 1,
        }
    }
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit.code())
    }
}

/// One operator session against one server.
pub struct Session<'a, L, W> {
    api: &'a CarsClient,
    input: L,
    screen: Screen<W>,
    spinners: bool,
}

impl<'a, L: LineSource, W: Write> Session<'a, L, W> {
    pub fn new(api: &'a CarsClient, input: L, screen: Screen<W>) -> Self {
        Session {
            api,
            input,
            screen,
            spinners: false,
        }
    }

    /// Show a spinner while requests are in flight.
    pub fn with_spinners(mut self, enabled: bool) -> Self {
        self.spinners = enabled;
        self
    }

    pub fn into_parts(self) -> (L, Screen<W>) {
        (self.input, self.screen)
    }

    /// Main interactive menu. Checks the server before every round and runs
    /// until the operator exits or the server stops answering.
    pub fn run(&mut self) -> Result<Exit> {
        loop {
            if !self.api.is_reachable(None) {
                self.screen.error("Server is not responding - quitting!")?;
                return Ok(Exit::ServerDown);
            }
            self.print_menu()?;
            match self.read_choice()? {
                MenuChoice::Exit => {
                    self.screen.say("Bye!")?;
                    return Ok(Exit::Quit);
                }
                MenuChoice::List => self.list_cars()?,
                MenuChoice::Add => self.add_car()?,
                MenuChoice::Delete => self.delete_car()?,
                MenuChoice::Update => self.update_car()?,
            }
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        let rule = format!("+ {} +", "-".repeat(35));
        self.screen.say(&rule)?;
        self.screen
            .say(&format!("| {:^35} |", "Vintage Cars Database"))?;
        self.screen.say(&rule)?;
        for line in [
            "M E N U",
            "=======",
            "1. List cars",
            "2. Add new car",
            "3. Delete car",
            "4. Update car",
            "0. Exit",
        ] {
            self.screen.say(line)?;
        }
        Ok(())
    }

    /// Re-prompts until one of the menu digits is entered.
    fn read_choice(&mut self) -> Result<MenuChoice> {
        loop {
            let line = self.input.read_line(CHOICE_PROMPT)?;
            if let Some(choice) = MenuChoice::parse(&line) {
                tracing::debug!(?choice, "menu choice");
                return Ok(choice);
            }
        }
    }

    fn list_cars(&mut self) -> Result<()> {
        let spinner = self.busy("Fetching cars...");
        let res = self.api.list();
        spinner.finish_and_clear();

        match res {
            Ok(Listing::Cars(cars)) => {
                for line in table::render(&cars) {
                    self.screen.say(&line)?;
                }
            }
            Ok(Listing::Rejected(status)) => {
                self.screen
                    .warn(&format!("Status Code: {}", status.as_u16()))?;
            }
            Err(e) => {
                tracing::error!(error = %e, "listing failed");
                self.screen.error(&format!("Could not list cars: {e}"))?;
            }
        }
        Ok(())
    }

    fn add_car(&mut self) -> Result<()> {
        let Some(car) = self.input_new_car()? else {
            return Ok(());
        };

        let spinner = self.busy("Adding car...");
        let res = self.api.create(&car);
        spinner.finish_and_clear();

        match res {
            Ok(Reply::Accepted) => {
                let msg = match car.id {
                    Some(id) => format!("Car ID: {id} inserted successfully!"),
                    None => "Car inserted successfully!".to_string(),
                };
                self.screen.success(&msg)?;
            }
            Ok(Reply::Rejected(status)) => {
                tracing::warn!(%status, "create rejected");
            }
            Err(e) => self.report_failure(&e)?,
        }
        Ok(())
    }

    fn delete_car(&mut self) -> Result<()> {
        let Some(id) = ask_once(&mut self.input, &mut self.screen, ID_PROMPT, parse_id)? else {
            return Ok(());
        };

        let spinner = self.busy("Deleting car...");
        let res = self.api.delete(id);
        spinner.finish_and_clear();

        match res {
            Ok(Reply::Accepted) => {
                self.screen
                    .success(&format!("Car ID: {id} deleted with success!"))?;
            }
            Ok(Reply::Rejected(status)) => {
                self.screen
                    .warn(&format!("Status Code: {}", status.as_u16()))?;
            }
            Err(e) => self.report_failure(&e)?,
        }
        Ok(())
    }

    fn update_car(&mut self) -> Result<()> {
        let Some(id) = ask_once(&mut self.input, &mut self.screen, ID_PROMPT, parse_id)? else {
            return Ok(());
        };
        if !self.api.is_reachable(Some(id)) {
            self.screen.warn(&format!("Car ID: {id} not found!"))?;
            return Ok(());
        }
        let Some(details) = self.input_details()? else {
            return Ok(());
        };

        let spinner = self.busy("Updating car...");
        let res = self.api.update(id, &details);
        spinner.finish_and_clear();

        match res {
            Ok(Reply::Accepted) => {
                self.screen
                    .success(&format!("Car ID: {id} updated successfully!"))?;
            }
            Ok(Reply::Rejected(status)) => {
                tracing::warn!(%id, %status, "update rejected");
            }
            Err(e) => self.report_failure(&e)?,
        }
        Ok(())
    }

    /// Optional id followed by the details. A blank id means the server
    /// picks one; running out of attempts cancels the whole record.
    fn input_new_car(&mut self) -> Result<Option<NewCar>> {
        let max = self.api.config().max_attempts;
        let answer = ask(&mut self.input, &mut self.screen, ID_PROMPT, max, parse_id)?;
        let id: Option<CarId> = match answer {
            Answer::Value(id) => Some(id),
            Answer::Blank => None,
            Answer::GaveUp => return Ok(None),
        };
        Ok(self.input_details()?.map(|details| NewCar { id, details }))
    }

    /// Brand, model, year and convertible flag, stopping at the first
    /// cancelled field.
    fn input_details(&mut self) -> Result<Option<CarDetails>> {
        let max = self.api.config().max_attempts;
        let (input, screen) = (&mut self.input, &mut self.screen);

        let Some(brand) =
            ask(&mut *input, &mut *screen, BRAND_PROMPT, max, parse_name)?.value()
        else {
            return Ok(None);
        };
        let Some(model) =
            ask(&mut *input, &mut *screen, MODEL_PROMPT, max, parse_name)?.value()
        else {
            return Ok(None);
        };
        let Some(production_year) =
            ask(&mut *input, &mut *screen, YEAR_PROMPT, max, parse_production_year)?.value()
        else {
            return Ok(None);
        };
        let Some(convertible) =
            ask(&mut *input, &mut *screen, CONVERTIBLE_PROMPT, max, parse_convertible)?.value()
        else {
            return Ok(None);
        };

        Ok(Some(CarDetails {
            brand,
            model,
            production_year,
            convertible,
        }))
    }

    fn report_failure(&mut self, e: &ApiError) -> Result<()> {
        tracing::error!(error = %e, "request failed");
        self.screen.error(&format!("Request failed: {e}"))?;
        Ok(())
    }

    /// `indicatif` spinner for the duration of a request; hidden when the
    /// session is not attended.
    fn busy(&self, msg: &'static str) -> ProgressBar {
        if !self.spinners {
            return ProgressBar::hidden();
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(msg);
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }
}
