//! Answer collection.
//!
//! Values supplied up front (flags, config) are validated once and fail hard
//! when invalid. Values asked interactively are re-asked until they pass,
//! each refusal reported through [`Prompter::reject`].

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::{
    application::ports::Prompter,
    domain::{
        Blueprint, ClassName, DomainError, ModuleName, Rejection, SubstitutionTable,
        parse_yes_no,
    },
    error::PrimerResult,
};

pub const AUTHOR_PROMPT: &str = "Enter your name";
pub const MODULE_PROMPT: &str = "Module name";
pub const LIBRARY_PROMPT: &str = "Is this going to be a library? [default: yes]";

/// Values already known before prompting.
#[derive(Debug, Clone, Default)]
pub struct Preset {
    pub author: Option<String>,
    pub module: Option<String>,
    /// Class token → class name.
    pub classes: BTreeMap<String, String>,
    pub library: Option<bool>,
}

/// Everything the user told us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    pub author: String,
    pub module: ModuleName,
    /// Class token → validated class name. Tokens left unanswered are absent.
    pub classes: BTreeMap<String, ClassName>,
    pub library: bool,
}

impl Answers {
    /// Build the placeholder table for `blueprint`.
    pub fn substitution_table(
        &self,
        blueprint: &Blueprint,
        year: i32,
    ) -> Result<SubstitutionTable, DomainError> {
        let p = &blueprint.placeholders;
        let mut table = SubstitutionTable::new();
        table.insert(&p.year, year.to_string())?;
        table.insert(&p.author, &self.author)?;
        table.insert(&p.module, self.module.as_str())?;
        for (token, class) in &self.classes {
            table.insert(token, class.as_str())?;
        }
        Ok(table)
    }
}

/// Ask `prompt` until `validate` accepts the answer.
pub fn ask_until_valid<T>(
    prompter: &dyn Prompter,
    prompt: &str,
    validate: impl Fn(&str) -> Result<T, Rejection>,
) -> PrimerResult<T> {
    loop {
        let response = prompter.ask(prompt)?;
        match validate(&response) {
            Ok(value) => return Ok(value),
            Err(reason) => {
                debug!(%response, %reason, "answer rejected");
                prompter.reject(&response, &reason)?;
            }
        }
    }
}

/// Gather every answer `blueprint` needs, asking only for what `preset`
/// does not already hold.
pub fn collect_answers(
    prompter: &dyn Prompter,
    blueprint: &Blueprint,
    preset: Preset,
) -> PrimerResult<Answers> {
    let author = match preset.author {
        Some(author) => author,
        None => prompter.ask(AUTHOR_PROMPT)?,
    };

    let module = match preset.module {
        Some(module) => ModuleName::parse(&module)?,
        None => ask_until_valid(prompter, MODULE_PROMPT, ModuleName::check)?,
    };

    let mut preset_classes = preset.classes;
    let mut classes = BTreeMap::new();
    for placeholder in &blueprint.placeholders.classes {
        let class = match preset_classes.remove(&placeholder.token) {
            Some(value) => Some(ClassName::parse(&value)?),
            None => {
                let prompt = format!(
                    "{} [leave empty to keep {}]",
                    placeholder.prompt, placeholder.token
                );
                ask_until_valid(prompter, &prompt, |r| {
                    if r.is_empty() {
                        return Ok(None);
                    }
                    ClassName::check(r).map(Some)
                })?
            }
        };
        if let Some(class) = class {
            classes.insert(placeholder.token.clone(), class);
        }
    }
    for token in preset_classes.keys() {
        warn!(%token, "ignoring class value for a token the template does not declare");
    }

    let library = match preset.library {
        Some(library) => library,
        None => parse_yes_no(&prompter.ask(LIBRARY_PROMPT)?, true),
    };

    Ok(Answers {
        author,
        module,
        classes,
        library,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockPrompter;
    use crate::domain::ClassPlaceholder;
    use crate::domain::validation::good_module_name;
    use crate::error::PrimerError;
    use mockall::{Sequence, predicate::eq};

    /// A prompter that answers from a script, in order.
    fn scripted(answers: &[&str]) -> MockPrompter {
        let mut mock = MockPrompter::new();
        let mut seq = Sequence::new();
        for answer in answers {
            let answer = answer.to_string();
            mock.expect_ask()
                .times(1)
                .in_sequence(&mut seq)
                .returning(move |_| Ok(answer.clone()));
        }
        mock
    }

    #[test]
    fn invalid_module_names_are_reasked() {
        let too_long = "a".repeat(21);
        let mut prompter = scripted(&["My_Proj", "my_proj", "my-proj", &too_long, "myproj"]);
        let mut seq = Sequence::new();
        for reason in [
            Rejection::NotLowercase,
            Rejection::ContainsUnderscore,
            Rejection::NotIdentifier,
            Rejection::TooLong { max: 20 },
        ] {
            prompter
                .expect_reject()
                .withf(move |_, r| *r == reason)
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_, _| Ok(()));
        }

        let name = ask_until_valid(&prompter, MODULE_PROMPT, |r| {
            good_module_name(r)?;
            Ok(r.to_owned())
        })
        .unwrap();
        assert_eq!(name, "myproj");
    }

    #[test]
    fn rejection_receives_the_raw_response() {
        let mut prompter = scripted(&["Bad", "good"]);
        prompter
            .expect_reject()
            .with(eq("Bad"), eq(Rejection::NotLowercase))
            .times(1)
            .returning(|_, _| Ok(()));

        let got = ask_until_valid(&prompter, "x", |r| good_module_name(r).map(|_| r.to_owned()));
        assert_eq!(got.unwrap(), "good");
    }

    #[test]
    fn prompt_failure_aborts_loop() {
        let mut prompter = MockPrompter::new();
        prompter.expect_ask().times(1).returning(|_| {
            Err(crate::application::ApplicationError::PromptFailed {
                reason: "eof".into(),
            }
            .into())
        });
        let got = ask_until_valid(&prompter, "x", |r| Ok(r.to_owned()));
        assert!(got.is_err());
    }

    #[test]
    fn collects_all_answers_interactively() {
        let mut prompter = scripted(&["Jane", "myproj", ""]);
        prompter.expect_reject().never();

        let answers = collect_answers(&prompter, &Blueprint::default(), Preset::default()).unwrap();
        assert_eq!(answers.author, "Jane");
        assert_eq!(answers.module.as_str(), "myproj");
        assert!(answers.library, "empty answer defaults to library");
        assert!(answers.classes.is_empty());
    }

    #[test]
    fn application_answer_clears_library() {
        let prompter = scripted(&["Jane", "myproj", "no"]);
        let answers = collect_answers(&prompter, &Blueprint::default(), Preset::default()).unwrap();
        assert!(!answers.library);
    }

    #[test]
    fn preset_values_skip_prompts() {
        let mut prompter = MockPrompter::new();
        prompter.expect_ask().never();

        let preset = Preset {
            author: Some("Jane".into()),
            module: Some("myproj".into()),
            classes: BTreeMap::new(),
            library: Some(true),
        };
        let answers = collect_answers(&prompter, &Blueprint::default(), preset).unwrap();
        assert_eq!(answers.module.as_str(), "myproj");
    }

    #[test]
    fn invalid_preset_module_is_fatal() {
        let mut prompter = MockPrompter::new();
        prompter.expect_ask().never();

        let preset = Preset {
            author: Some("Jane".into()),
            module: Some("My_Proj".into()),
            ..Preset::default()
        };
        let err = collect_answers(&prompter, &Blueprint::default(), preset).unwrap_err();
        assert!(matches!(
            err,
            PrimerError::Domain(DomainError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn class_prompts_accept_empty_and_reask_lowercase() {
        let mut blueprint = Blueprint::default();
        blueprint.placeholders.classes = vec![
            ClassPlaceholder {
                token: "TemplateClass".into(),
                prompt: "Main class".into(),
            },
            ClassPlaceholder {
                token: "TemplateError".into(),
                prompt: "Error class".into(),
            },
        ];

        // author, module, class 1 (bad then good), class 2 (empty), library
        let mut prompter = scripted(&["Jane", "myproj", "widget", "Widget", "", "y"]);
        prompter
            .expect_reject()
            .with(eq("widget"), eq(Rejection::NotCapitalized))
            .times(1)
            .returning(|_, _| Ok(()));

        let answers = collect_answers(&prompter, &blueprint, Preset::default()).unwrap();
        assert_eq!(answers.classes.len(), 1);
        assert_eq!(answers.classes["TemplateClass"].as_str(), "Widget");
    }

    #[test]
    fn substitution_table_uses_blueprint_tokens() {
        let answers = Answers {
            author: "Jane".into(),
            module: ModuleName::parse("myproj").unwrap(),
            classes: BTreeMap::new(),
            library: true,
        };
        let table = answers
            .substitution_table(&Blueprint::default(), 2026)
            .unwrap();
        assert_eq!(table.get("CURRENT_YEAR_HERE"), Some("2026"));
        assert_eq!(table.get("YOUR_NAME_HERE"), Some("Jane"));
        assert_eq!(table.get("pythontemplate"), Some("myproj"));
        assert_eq!(table.len(), 3);
    }
}
