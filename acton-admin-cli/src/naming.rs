//! Naming conventions for scaffolded entities
//!
//! Turns the name typed on the command line into the casing variants the
//! generated code needs: the class name, the URL segment and the label shown
//! in the sidebar.
//!
//! Word boundaries follow the target framework's string helpers. Separators
//! (whitespace, `-`, `_`) start a new word and each word gets an uppercase
//! first letter; letters that are already uppercase stay uppercase. The URL
//! segment is the class name with a hyphen before every uppercase letter.
//! Both rules are Unicode aware.

use crate::error::ScaffoldError;
use inflector::Inflector;

/// Casing variants derived from a raw entity name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityNames {
    raw: String,
    title: String,
    kebab: String,
    plural_display: String,
}

impl EntityNames {
    /// Derive all variants from a raw name
    ///
    /// # Examples
    ///
    /// ```
    /// # use acton_admin_cli_lib::naming::EntityNames;
    /// let names = EntityNames::derive("blog post").unwrap();
    /// assert_eq!(names.title(), "BlogPost");
    /// assert_eq!(names.kebab(), "blog-post");
    /// assert_eq!(names.plural_display(), "Blog posts");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidName`] when the name has no letters or digits.
    pub fn derive(raw: &str) -> Result<Self, ScaffoldError> {
        let title = upper_first(&studly_case(raw));
        if !title.chars().any(char::is_alphanumeric) {
            return Err(ScaffoldError::InvalidName {
                raw: raw.to_string(),
            });
        }

        let mut names = Self::from_title(&title);
        names.raw = raw.to_string();
        Ok(names)
    }

    /// Build the variants from an already derived class name
    ///
    /// The title is kept as is; nothing is re-split.
    #[must_use]
    pub fn from_title(title: &str) -> Self {
        let kebab = kebab_case(title);
        let plural_display = upper_first(&pluralize_last_word(&kebab).replace('-', " "));

        Self {
            raw: title.to_string(),
            title: title.to_string(),
            kebab,
            plural_display,
        }
    }

    /// Name as typed by the user
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Class name, e.g. `BlogPost`
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// URL segment, e.g. `blog-post`
    #[must_use]
    pub fn kebab(&self) -> &str {
        &self.kebab
    }

    /// Sidebar label, e.g. `Blog posts`
    #[must_use]
    pub fn plural_display(&self) -> &str {
        &self.plural_display
    }

    /// Singular label, e.g. `blog post`
    #[must_use]
    pub fn singular_label(&self) -> String {
        self.kebab.replace('-', " ")
    }

    /// Lowercase plural label, e.g. `blog posts`
    #[must_use]
    pub fn plural_label(&self) -> String {
        pluralize_last_word(&self.kebab).replace('-', " ")
    }

    /// Conventional table name, e.g. `blog_posts`
    #[must_use]
    pub fn table(&self) -> String {
        pluralize_last_word(&self.kebab).replace('-', "_")
    }

    /// Name of the generated CRUD controller class
    #[must_use]
    pub fn controller_class(&self) -> String {
        format!("{}CrudController", self.title)
    }

    /// Name of the generated form request class
    #[must_use]
    pub fn request_class(&self) -> String {
        format!("{}Request", self.title)
    }
}

/// Join words with an uppercase first letter each, e.g. `blog post` -> `BlogPost`
///
/// The rest of every word is left untouched, so `HTTPServer` stays `HTTPServer`.
#[must_use]
pub fn studly_case(input: &str) -> String {
    input
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .map(upper_first)
        .collect()
}

/// Hyphen before every uppercase letter after the first, then lowercase
///
/// ```
/// # use acton_admin_cli_lib::naming::kebab_case;
/// assert_eq!(kebab_case("BlogPost"), "blog-post");
/// assert_eq!(kebab_case("CaféMenu"), "café-menu");
/// assert_eq!(kebab_case("Post2"), "post2");
/// ```
#[must_use]
pub fn kebab_case(title: &str) -> String {
    let mut kebab = String::with_capacity(title.len() + 4);
    for (index, c) in title.chars().filter(|c| !c.is_whitespace()).enumerate() {
        if index > 0 && c.is_uppercase() {
            kebab.push('-');
        }
        kebab.extend(c.to_lowercase());
    }
    kebab
}

/// Pluralize only the final hyphen-separated word
fn pluralize_last_word(kebab: &str) -> String {
    match kebab.rsplit_once('-') {
        Some((head, last)) => format!("{head}-{}", last.to_plural()),
        None => kebab.to_plural(),
    }
}

fn upper_first(input: &str) -> String {
    let mut chars = input.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
