use scoby_core::entities::Experiment;
use scoby_core::enums::Section;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SectionCommands;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SectionView<'a> {
    section: Section,
    date: Option<&'a str>,
    notes: &'a str,
    user_name: Option<&'a str>,
}

impl<'a> SectionView<'a> {
    fn of(experiment: &'a Experiment, section: Section) -> Self {
        Self {
            section,
            date: experiment.section_date(section),
            notes: experiment.section_notes(section),
            user_name: experiment.section_user_name(section),
        }
    }
}

/// Handle `scoby section`.
pub async fn handle(
    action: &SectionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let SectionCommands::Set {
        experiment,
        section,
        date,
        notes,
        user_name,
    } = action;
    let section = parse_enum::<Section>(section, "section")?;

    let (experiment, ()) = ctx
        .service
        .update_experiment(experiment, |experiment| {
            if let Some(date) = date {
                experiment.set_section_date(section, Some(date.as_str()))?;
            }
            if let Some(notes) = notes {
                experiment.set_section_notes(section, notes);
            }
            if let Some(user_name) = user_name {
                experiment.set_section_user_name(section, Some(user_name.as_str()));
            }
            Ok(())
        })
        .await?;

    output(&SectionView::of(&experiment, section), flags.format)
}

#[cfg(test)]
mod tests {
    use scoby_core::edit::TeaSelection;
    use scoby_core::entities::{Experiment, TeaSettings};
    use scoby_core::enums::Section;

    use super::SectionView;

    #[test]
    fn section_view_serializes_camel_case() {
        let tea = TeaSettings::placeholder(1, "Assam");
        let mut experiment = Experiment::create(
            "Run",
            "desc",
            &[TeaSelection {
                tea,
                replicates: 1,
            }],
        )
        .expect("experiment should be created");
        experiment.set_section_user_name(Section::CellCounting, Some("ana"));

        let json = serde_json::to_value(SectionView::of(&experiment, Section::CellCounting))
            .expect("view should serialize");
        assert_eq!(json["section"], "cell_counting");
        assert_eq!(json["userName"], "ana");
        assert_eq!(json["notes"], "");
        assert!(json["date"].is_null());
    }
}
