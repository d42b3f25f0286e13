//! Interactive menu for the Secure Recipe service.
//!
//! Reads choices and field values line by line, re-prompting until every value
//! passes its domain check, and prints recipes or the service's error message.
//! Input and output are generic so the whole loop can be driven from a script.

use std::io::{BufRead, Write};
use std::str::FromStr;

use thiserror::Error;

use crate::client::{ApiError, RecipeClient, RecipeDraft};
use crate::domain::{
    push_distinct, Description, Email, Id, Ingredient, Name, Password, Quantity, Recipe, Title,
    Unit, Username, ValidationError,
};

/// Login attempts before giving up and returning to the menu.
pub const MAX_LOGIN_ATTEMPTS: usize = 3;

const BANNER: &str = "Secure Recipe Application from Command Line";
const ATTENTION: &str = "*** ATTENTION ***";

#[derive(Debug, Error)]
pub enum AppError {
    /// The input stream ended while a value was expected.
    #[error("input closed")]
    EndOfInput,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    SignUp,
    Login,
    ShowAll,
    ShowOne,
    SortByDate,
    SortByTitle,
    SortMineByDate,
    SortMineByTitle,
    Add,
    Delete,
    FilterByAuthor,
    FilterByTitle,
    FilterByIngredient,
    Update,
    Logout,
    Exit,
}

const ENTRIES: [(&str, &str, Action); 16] = [
    ("1", "Sign up", Action::SignUp),
    ("2", "Login", Action::Login),
    ("3", "Show all the recipes", Action::ShowAll),
    ("4", "Show a recipe given its id", Action::ShowOne),
    ("5", "Sort recipes by date", Action::SortByDate),
    ("6", "Sort recipes by title", Action::SortByTitle),
    ("7", "Sort my recipes by date", Action::SortMineByDate),
    ("8", "Sort my recipes by title", Action::SortMineByTitle),
    ("9", "Add recipe", Action::Add),
    ("10", "Delete recipe", Action::Delete),
    ("11", "Filter recipes by author", Action::FilterByAuthor),
    ("12", "Filter recipes by title", Action::FilterByTitle),
    ("13", "Filter recipes by ingredient", Action::FilterByIngredient),
    ("14", "Update recipe", Action::Update),
    ("15", "Log out", Action::Logout),
    ("0", "Exit", Action::Exit),
];

pub struct Application<R, W> {
    client: RecipeClient,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Application<R, W> {
    pub fn new(client: RecipeClient, input: R, output: W) -> Self {
        Self {
            client,
            input,
            output,
        }
    }

    pub fn into_client(self) -> RecipeClient {
        self.client
    }

    /// Runs the menu until the user exits or the input ends.
    pub async fn run(&mut self) -> Result<(), AppError> {
        writeln!(self.output, "Welcome to Secure Recipe!")?;
        loop {
            match self.step().await {
                Ok(true) => continue,
                Ok(false) | Err(AppError::EndOfInput) => break,
                Err(e) => return Err(e),
            }
        }
        writeln!(self.output, "Bye bye!")?;
        Ok(())
    }

    /// Shows the menu and performs one action. `false` means exit.
    async fn step(&mut self) -> Result<bool, AppError> {
        self.print_menu()?;
        let choice = self.read_line("? ")?;
        let Some(action) = ENTRIES
            .iter()
            .find(|(key, _, _)| *key == choice.trim())
            .map(|(_, _, action)| *action)
        else {
            writeln!(self.output, "Invalid selection. Please, try again...")?;
            return Ok(true);
        };

        tracing::debug!("Selected menu action: {:?}", action);
        match action {
            Action::SignUp => self.sign_up().await?,
            Action::Login => self.login().await?,
            Action::ShowAll => {
                let result = self.client.all_recipes().await;
                self.print_recipes(result)?;
            }
            Action::ShowOne => {
                let id: Id = self.read_value("Id: ")?;
                let result = self.client.recipe(id).await.map(|recipe| vec![recipe]);
                self.print_recipes(result)?;
            }
            Action::SortByDate => {
                let result = self.client.sorted_by_date().await;
                self.print_recipes(result)?;
            }
            Action::SortByTitle => {
                let result = self.client.sorted_by_title().await;
                self.print_recipes(result)?;
            }
            Action::SortMineByDate => {
                let result = self.client.my_recipes_sorted_by_date().await;
                self.print_recipes(result)?;
            }
            Action::SortMineByTitle => {
                let result = self.client.my_recipes_sorted_by_title().await;
                self.print_recipes(result)?;
            }
            Action::Add => self.add_recipe().await?,
            Action::Delete => self.delete_recipe().await?,
            Action::FilterByAuthor => {
                let author: Username = self.read_value("Author: ")?;
                let result = self.client.filter_by_author(&author).await;
                self.print_recipes(result)?;
            }
            Action::FilterByTitle => {
                let title: Title = self.read_value("Title: ")?;
                let result = self.client.filter_by_title(&title).await;
                self.print_recipes(result)?;
            }
            Action::FilterByIngredient => {
                let name: Name = self.read_value("Ingredient: ")?;
                let result = self.client.filter_by_ingredient(&name).await;
                self.print_recipes(result)?;
            }
            Action::Update => self.update_recipe().await?,
            Action::Logout => self.logout().await?,
            Action::Exit => return Ok(false),
        }
        Ok(true)
    }

    async fn sign_up(&mut self) -> Result<(), AppError> {
        let username: Username = self.read_value("Username: ")?;
        let email: Email = self.read_value("Email: ")?;
        let (password1, password2) = loop {
            let password1: Password = self.read_value("Password: ")?;
            let password2: Password = self.read_value("Repeat password: ")?;
            if password1 == password2 {
                break (password1, password2);
            }
            self.error("The two passwords do not match.")?;
        };

        match self
            .client
            .sign_up(&username, &email, &password1, &password2)
            .await
        {
            Ok(()) => writeln!(
                self.output,
                "Welcome to Secure Recipe! You are now registered as a new user."
            )?,
            Err(e) => self.error(&e.to_string())?,
        }
        Ok(())
    }

    async fn login(&mut self) -> Result<(), AppError> {
        if self.client.is_authenticated() {
            writeln!(self.output, "You are already logged in.")?;
            return Ok(());
        }

        for attempt in 1..=MAX_LOGIN_ATTEMPTS {
            let username: Username = self.read_value("Username: ")?;
            let password: Password = self.read_value("Password: ")?;

            match self.client.login(&username, &password).await {
                Ok(()) => {
                    writeln!(self.output, "Login successful!")?;
                    match self.client.role().await {
                        Ok(role) => writeln!(self.output, "{role}")?,
                        Err(e) => self.error(&e.to_string())?,
                    }
                    return Ok(());
                }
                Err(ApiError::Rejected { .. }) if attempt < MAX_LOGIN_ATTEMPTS => {
                    self.error("Incorrect login, retry!")?;
                }
                Err(ApiError::Rejected { .. }) => {
                    self.error("Incorrect login, max number of attempts achieved.")?;
                }
                Err(e) => {
                    self.error(&e.to_string())?;
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    async fn logout(&mut self) -> Result<(), AppError> {
        if !self.client.is_authenticated() {
            return self.error("You are not logged in.");
        }
        match self.client.logout().await {
            Ok(()) => writeln!(self.output, "Logged out!")?,
            Err(e) => self.error(&format!("Logout failed! {e}"))?,
        }
        Ok(())
    }

    async fn add_recipe(&mut self) -> Result<(), AppError> {
        if !self.ensure_logged_in()? {
            return Ok(());
        }
        let title: Title = self.read_value("Title: ")?;
        let description: Description = self.read_value("Description: ")?;
        let ingredients = self.read_ingredients()?;

        let draft = match RecipeDraft::new(title, description, ingredients) {
            Ok(draft) => draft,
            Err(e) => return self.error(&e.to_string()),
        };
        let result = self.client.add_recipe(&draft).await.map(|recipe| vec![recipe]);
        self.print_recipes(result)
    }

    async fn update_recipe(&mut self) -> Result<(), AppError> {
        if !self.ensure_logged_in()? {
            return Ok(());
        }
        let id: Id = self.read_value("Id: ")?;
        let current = match self.client.recipe(id).await {
            Ok(recipe) => recipe,
            Err(e) => return self.error(&e.to_string()),
        };
        self.print_recipe(&current)?;

        let current = RecipeDraft::from(&current);
        let title = if self.read_yes_no("Do you want to change the title? (y/n) ")? {
            self.read_value("Title: ")?
        } else {
            current.title().clone()
        };
        let description = if self.read_yes_no("Do you want to change the description? (y/n) ")? {
            self.read_value("Description: ")?
        } else {
            current.description().clone()
        };
        let ingredients = if self.read_yes_no("Do you want to change the ingredients? (y/n) ")? {
            self.read_ingredients()?
        } else {
            current.ingredients().to_vec()
        };

        let draft = match RecipeDraft::new(title, description, ingredients) {
            Ok(draft) => draft,
            Err(e) => return self.error(&e.to_string()),
        };
        let result = self.client.update_recipe(id, &draft).await.map(|recipe| vec![recipe]);
        self.print_recipes(result)
    }

    async fn delete_recipe(&mut self) -> Result<(), AppError> {
        if !self.ensure_logged_in()? {
            return Ok(());
        }
        let id: Id = self.read_value("Id: ")?;
        match self.client.delete_recipe(id).await {
            Ok(()) => writeln!(self.output, "The recipe is cancelled!")?,
            Err(e) => self.error(&e.to_string())?,
        }
        Ok(())
    }

    /// Reads ingredients until the user stops answering `y`. Names already in
    /// the list are refused on the spot with the recipe's own duplicate error.
    fn read_ingredients(&mut self) -> Result<Vec<Ingredient>, AppError> {
        let mut ingredients: Vec<Ingredient> = Vec::new();
        loop {
            let name: Name = self.read_value("Name of the ingredient: ")?;
            let quantity: Quantity = self.read_value("Quantity of the ingredient: ")?;
            let unit: Unit = self.read_value("Unit (kg, g, l, cl, ml, cup, n/a): ")?;

            let ingredient = Ingredient::new(name, quantity, unit);
            if let Err(e) = push_distinct(&mut ingredients, ingredient) {
                self.error(&e.to_string())?;
            }

            if ingredients.is_empty() {
                continue;
            }
            if !self.read_yes_no("Do you want to add another ingredient? (y/n) ")? {
                return Ok(ingredients);
            }
        }
    }

    fn ensure_logged_in(&mut self) -> Result<bool, AppError> {
        if self.client.is_authenticated() {
            return Ok(true);
        }
        self.error(&ApiError::NotAuthenticated.to_string())?;
        Ok(false)
    }

    fn print_menu(&mut self) -> Result<(), AppError> {
        writeln!(self.output)?;
        writeln!(self.output, "{BANNER}")?;
        writeln!(self.output)?;
        for (key, label, _) in ENTRIES.iter() {
            writeln!(self.output, "{key}:\t{label}")?;
        }
        Ok(())
    }

    fn print_recipes(&mut self, result: Result<Vec<Recipe>, ApiError>) -> Result<(), AppError> {
        match result {
            Ok(recipes) if recipes.is_empty() => writeln!(self.output, "No recipes found.")?,
            Ok(recipes) => {
                for recipe in &recipes {
                    self.print_recipe(recipe)?;
                }
            }
            Err(e) => self.error(&e.to_string())?,
        }
        Ok(())
    }

    fn print_recipe(&mut self, recipe: &Recipe) -> Result<(), AppError> {
        writeln!(self.output)?;
        write!(self.output, "{recipe}")?;
        Ok(())
    }

    fn error(&mut self, message: &str) -> Result<(), AppError> {
        writeln!(self.output, "{ATTENTION}")?;
        writeln!(self.output, "{message}")?;
        writeln!(self.output, "{ATTENTION}")?;
        Ok(())
    }

    /// Prompts until the line parses into `T`, showing the validation hint
    /// after each rejected value.
    fn read_value<T>(&mut self, prompt: &str) -> Result<T, AppError>
    where
        T: FromStr<Err = ValidationError>,
    {
        loop {
            let line = self.read_line(prompt)?;
            match line.parse::<T>() {
                Ok(value) => return Ok(value),
                Err(e) => self.error(&e.to_string())?,
            }
        }
    }

    fn read_yes_no(&mut self, prompt: &str) -> Result<bool, AppError> {
        let answer = self.read_line(prompt)?;
        Ok(answer.trim().eq_ignore_ascii_case("y"))
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, AppError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AppError::EndOfInput);
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }
}
