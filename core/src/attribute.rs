//! Closed attribute registries, one per listing section.
//!
//! Every attribute carries a canonical label (its *token*) — the literal
//! text the listing prints next to the value. Matching is case-insensitive
//! and exact on the trimmed label; there is no fuzzy or partial matching.
//! The tables are static and closed: a section's keys are fixed at compile
//! time and never extended at runtime.

use serde::{Deserialize, Serialize};

use crate::Section;

/// Columns of the fixed-layout header table.
///
/// The header prints two label lines above a single data line:
///
/// ```text
///   JOB    ----JCL----   SYSTEM  USR MAIN PROSE  SCHED  --NUMBER OF-   LAST-RUN
///   NAME    ID  MEMBER   -NAME-  -ID -ID- DSNBR  DSNBR  STP DDS RUNS   DATE/TIME
/// ```
///
/// Group labels on the first line (`----JCL----`, `--NUMBER OF-`) span
/// several sub-columns on the second; the canonical tokens below combine
/// both parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeaderAttribute {
    JobName,
    JclId,
    JclMember,
    SystemName,
    UsrId,
    MainId,
    ProseDsnbr,
    SchedDsnbr,
    NumberOfStp,
    NumberOfDds,
    NumberOfRuns,
    LastRunDt,
}

impl HeaderAttribute {
    pub const ALL: [HeaderAttribute; 12] = [
        HeaderAttribute::JobName,
        HeaderAttribute::JclId,
        HeaderAttribute::JclMember,
        HeaderAttribute::SystemName,
        HeaderAttribute::UsrId,
        HeaderAttribute::MainId,
        HeaderAttribute::ProseDsnbr,
        HeaderAttribute::SchedDsnbr,
        HeaderAttribute::NumberOfStp,
        HeaderAttribute::NumberOfDds,
        HeaderAttribute::NumberOfRuns,
        HeaderAttribute::LastRunDt,
    ];

    /// Canonical label for this column.
    pub const fn token(self) -> &'static str {
        match self {
            HeaderAttribute::JobName => "JOB NAME",
            HeaderAttribute::JclId => "JCL ID",
            HeaderAttribute::JclMember => "JCL MEMBER",
            HeaderAttribute::SystemName => "SYSTEM NAME",
            HeaderAttribute::UsrId => "USR ID",
            HeaderAttribute::MainId => "MAIN ID",
            HeaderAttribute::ProseDsnbr => "PROSE DSNBR",
            HeaderAttribute::SchedDsnbr => "SCHED DSNBR",
            HeaderAttribute::NumberOfStp => "NUMBER OF STP",
            HeaderAttribute::NumberOfDds => "NUMBER OF DDS",
            HeaderAttribute::NumberOfRuns => "NUMBER OF RUNS",
            HeaderAttribute::LastRunDt => "LAST RUN DT",
        }
    }

    /// Matches a token to a column. Case-insensitive, trimmed.
    pub fn match_token(token: &str) -> Option<HeaderAttribute> {
        let token = token.trim();
        Self::ALL
            .into_iter()
            .find(|attr| attr.token().eq_ignore_ascii_case(token))
    }

    /// Matches a reconstructed column label (group part plus sub part, dash
    /// decoration already stripped) to a column.
    ///
    /// This accepts the labels exactly as they can be reassembled from the
    /// two header lines, including the `LAST-RUN DATE/TIME` spelling whose
    /// canonical token is `LAST RUN DT`.
    pub fn from_column_label(label: &str) -> Option<HeaderAttribute> {
        let label = label.trim();
        if let Some(attr) = Self::match_token(label) {
            return Some(attr);
        }
        if label.eq_ignore_ascii_case("LAST-RUN DATE/TIME")
            || label.eq_ignore_ascii_case("LAST RUN DATE/TIME")
        {
            return Some(HeaderAttribute::LastRunDt);
        }
        None
    }
}

/// Attributes of the `JOB INFORMATION` section.
///
/// Three line shapes coexist in this section: `Y/N -- LABEL` flag pairs,
/// `. LABEL=value,LABEL=value` runs, and narrative `.` lines captured
/// verbatim. Flag attributes store `"true"`/`"false"`; everything else
/// stores the normalized label value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobInformationAttribute {
    // Y/N flag lines, two per row.
    SchdResolutionRequired,
    OverrideOfJclRequired,
    ManualVerificationReqd,
    RequiremntsToBeListed,
    AutoGenerationOf7Rms,
    ErrorsForRqmtNotUsed,
    ErrorsForDsnNotFound,
    LoadStepToBeExecuted,
    JobMarkedAsMaintOnly,
    JobSetForHoldInReqq,
    CompTriggersOtherJobs,
    JobEligibleForPrompts,
    JobSetForExecOnMain,
    JclToBeKeptInPrrnQ,
    UnixSwitchUserCmdSu,
    PrmToBeKeptInPrrnQ,
    // `LABEL=value` runs. LAST RUN only appears when the EXEC time zone
    // differs from the CA 7 one; its CA 7 / EXEC / EXEC TZO subfields carry
    // the values.
    LastRun,
    LastRunCa7,
    LastRunExec,
    LastRunExecTzo,
    Owner,
    Jcllib,
    Arfset,
    Class,
    Msgclass,
    Region,
    Prty,
    Cputm,
    Elaptm,
    Tape1Calc,
    Tape1Manl,
    Tape2Calc,
    Tape2Manl,
    Drclass,
    Lterm,
    Jobnet,
    Nxtcyc,
    TimesLate,
    TimesRestarted,
    // Narrative lines captured verbatim after their label.
    LastMaintenanceOn,
    JclSetFor,
    DontScheduleBefore,
    ConsiderAbnormalEndIf,
    SatisfactionLeadTime,
}

impl JobInformationAttribute {
    pub const ALL: [JobInformationAttribute; 44] = [
        JobInformationAttribute::SchdResolutionRequired,
        JobInformationAttribute::OverrideOfJclRequired,
        JobInformationAttribute::ManualVerificationReqd,
        JobInformationAttribute::RequiremntsToBeListed,
        JobInformationAttribute::AutoGenerationOf7Rms,
        JobInformationAttribute::ErrorsForRqmtNotUsed,
        JobInformationAttribute::ErrorsForDsnNotFound,
        JobInformationAttribute::LoadStepToBeExecuted,
        JobInformationAttribute::JobMarkedAsMaintOnly,
        JobInformationAttribute::JobSetForHoldInReqq,
        JobInformationAttribute::CompTriggersOtherJobs,
        JobInformationAttribute::JobEligibleForPrompts,
        JobInformationAttribute::JobSetForExecOnMain,
        JobInformationAttribute::JclToBeKeptInPrrnQ,
        JobInformationAttribute::UnixSwitchUserCmdSu,
        JobInformationAttribute::PrmToBeKeptInPrrnQ,
        JobInformationAttribute::LastRun,
        JobInformationAttribute::LastRunCa7,
        JobInformationAttribute::LastRunExec,
        JobInformationAttribute::LastRunExecTzo,
        JobInformationAttribute::Owner,
        JobInformationAttribute::Jcllib,
        JobInformationAttribute::Arfset,
        JobInformationAttribute::Class,
        JobInformationAttribute::Msgclass,
        JobInformationAttribute::Region,
        JobInformationAttribute::Prty,
        JobInformationAttribute::Cputm,
        JobInformationAttribute::Elaptm,
        JobInformationAttribute::Tape1Calc,
        JobInformationAttribute::Tape1Manl,
        JobInformationAttribute::Tape2Calc,
        JobInformationAttribute::Tape2Manl,
        JobInformationAttribute::Drclass,
        JobInformationAttribute::Lterm,
        JobInformationAttribute::Jobnet,
        JobInformationAttribute::Nxtcyc,
        JobInformationAttribute::TimesLate,
        JobInformationAttribute::TimesRestarted,
        JobInformationAttribute::LastMaintenanceOn,
        JobInformationAttribute::JclSetFor,
        JobInformationAttribute::DontScheduleBefore,
        JobInformationAttribute::ConsiderAbnormalEndIf,
        JobInformationAttribute::SatisfactionLeadTime,
    ];

    /// Narrative labels whose lines are captured verbatim, not split into
    /// `=`-pairs. Checked by longest-prefix before pair extraction.
    pub const NARRATIVE: [JobInformationAttribute; 5] = [
        JobInformationAttribute::ConsiderAbnormalEndIf,
        JobInformationAttribute::DontScheduleBefore,
        JobInformationAttribute::LastMaintenanceOn,
        JobInformationAttribute::SatisfactionLeadTime,
        JobInformationAttribute::JclSetFor,
    ];

    pub const fn token(self) -> &'static str {
        match self {
            JobInformationAttribute::SchdResolutionRequired => "SCHD RESOLUTION REQUIRED",
            JobInformationAttribute::OverrideOfJclRequired => "OVERRIDE OF JCL REQUIRED",
            JobInformationAttribute::ManualVerificationReqd => "MANUAL VERIFICATION REQD",
            JobInformationAttribute::RequiremntsToBeListed => "REQUIREMNTS TO BE LISTED",
            JobInformationAttribute::AutoGenerationOf7Rms => "AUTO-GENERATION OF 7 RMS",
            JobInformationAttribute::ErrorsForRqmtNotUsed => "ERRORS FOR RQMT NOT USED",
            JobInformationAttribute::ErrorsForDsnNotFound => "ERRORS FOR DSN NOT FOUND",
            JobInformationAttribute::LoadStepToBeExecuted => "LOAD STEP TO BE EXECUTED",
            JobInformationAttribute::JobMarkedAsMaintOnly => "JOB MARKED AS MAINT ONLY",
            JobInformationAttribute::JobSetForHoldInReqq => "JOB SET FOR HOLD IN REQQ",
            JobInformationAttribute::CompTriggersOtherJobs => "COMP TRIGGERS OTHER JOBS",
            JobInformationAttribute::JobEligibleForPrompts => "JOB ELIGIBLE FOR PROMPTS",
            JobInformationAttribute::JobSetForExecOnMain => "JOB SET FOR EXEC ON MAIN",
            JobInformationAttribute::JclToBeKeptInPrrnQ => "JCL TO BE KEPT IN PRRN/Q",
            JobInformationAttribute::UnixSwitchUserCmdSu => "UNIX SWITCH USER CMD SU-",
            JobInformationAttribute::PrmToBeKeptInPrrnQ => "PRM TO BE KEPT IN PRRN/Q",
            JobInformationAttribute::LastRun => "LAST RUN",
            JobInformationAttribute::LastRunCa7 => "CA 7",
            JobInformationAttribute::LastRunExec => "EXEC",
            JobInformationAttribute::LastRunExecTzo => "EXEC TZO",
            JobInformationAttribute::Owner => "OWNER",
            JobInformationAttribute::Jcllib => "JCLLIB",
            JobInformationAttribute::Arfset => "ARFSET",
            JobInformationAttribute::Class => "CLASS",
            JobInformationAttribute::Msgclass => "MSGCLASS",
            JobInformationAttribute::Region => "REGION",
            JobInformationAttribute::Prty => "PRTY",
            JobInformationAttribute::Cputm => "CPUTM",
            JobInformationAttribute::Elaptm => "ELAPTM",
            JobInformationAttribute::Tape1Calc => "TAPE1 CALC",
            JobInformationAttribute::Tape1Manl => "TAPE1 MANL",
            JobInformationAttribute::Tape2Calc => "TAPE2 CALC",
            JobInformationAttribute::Tape2Manl => "TAPE2 MANL",
            JobInformationAttribute::Drclass => "DRCLASS",
            JobInformationAttribute::Lterm => "LTERM",
            JobInformationAttribute::Jobnet => "JOBNET",
            JobInformationAttribute::Nxtcyc => "NXTCYC",
            JobInformationAttribute::TimesLate => "# OF TIMES LATE",
            JobInformationAttribute::TimesRestarted => "# OF TIMES RESTARTED",
            JobInformationAttribute::LastMaintenanceOn => "LAST MAINTENANCE ON",
            JobInformationAttribute::JclSetFor => "JCL SET FOR",
            JobInformationAttribute::DontScheduleBefore => "DONT SCHEDULE BEFORE",
            JobInformationAttribute::ConsiderAbnormalEndIf => "CONSIDER ABNORMAL END IF",
            JobInformationAttribute::SatisfactionLeadTime => "SATISFACTION LEAD TIME",
        }
    }

    pub fn match_token(token: &str) -> Option<JobInformationAttribute> {
        let token = token.trim();
        Self::ALL
            .into_iter()
            .find(|attr| attr.token().eq_ignore_ascii_case(token))
    }
}

/// Attributes of the `AGENT INFORMATION` section (`Label : Value` lines).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentInformationAttribute {
    JobType,
    Agent,
    Userid,
}

impl AgentInformationAttribute {
    pub const ALL: [AgentInformationAttribute; 3] = [
        AgentInformationAttribute::JobType,
        AgentInformationAttribute::Agent,
        AgentInformationAttribute::Userid,
    ];

    pub const fn token(self) -> &'static str {
        match self {
            AgentInformationAttribute::JobType => "Job Type",
            AgentInformationAttribute::Agent => "Agent",
            AgentInformationAttribute::Userid => "Userid",
        }
    }

    pub fn match_token(token: &str) -> Option<AgentInformationAttribute> {
        let token = token.trim();
        Self::ALL
            .into_iter()
            .find(|attr| attr.token().eq_ignore_ascii_case(token))
    }
}

/// The single attribute of the prose section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProseAttribute {
    Prose,
}

impl ProseAttribute {
    pub const ALL: [ProseAttribute; 1] = [ProseAttribute::Prose];

    pub const fn token(self) -> &'static str {
        "PROSE"
    }

    pub fn match_token(token: &str) -> Option<ProseAttribute> {
        let token = token.trim();
        Self::ALL
            .into_iter()
            .find(|attr| attr.token().eq_ignore_ascii_case(token))
    }
}

/// Any attribute of any section — the `(section, key)` pair as one value.
///
/// # Examples
///
/// ```
/// use ljob_core::{Attribute, HeaderAttribute, Section};
///
/// let attr = Attribute::Header(HeaderAttribute::JobName);
/// assert_eq!(attr.section(), Section::Header);
/// assert_eq!(attr.token(), "JOB NAME");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Header(HeaderAttribute),
    JobInformation(JobInformationAttribute),
    AgentInformation(AgentInformationAttribute),
    Prose(ProseAttribute),
}

impl Attribute {
    /// The section this attribute belongs to.
    pub const fn section(self) -> Section {
        match self {
            Attribute::Header(_) => Section::Header,
            Attribute::JobInformation(_) => Section::JobInformation,
            Attribute::AgentInformation(_) => Section::AgentInformation,
            Attribute::Prose(_) => Section::Prose,
        }
    }

    /// The canonical label of this attribute.
    pub const fn token(self) -> &'static str {
        match self {
            Attribute::Header(attr) => attr.token(),
            Attribute::JobInformation(attr) => attr.token(),
            Attribute::AgentInformation(attr) => attr.token(),
            Attribute::Prose(attr) => attr.token(),
        }
    }

    /// All attributes of one section, in registry order.
    pub fn all_in(section: Section) -> Vec<Attribute> {
        match section {
            Section::Header => HeaderAttribute::ALL
                .into_iter()
                .map(Attribute::Header)
                .collect(),
            Section::JobInformation => JobInformationAttribute::ALL
                .into_iter()
                .map(Attribute::JobInformation)
                .collect(),
            Section::AgentInformation => AgentInformationAttribute::ALL
                .into_iter()
                .map(Attribute::AgentInformation)
                .collect(),
            Section::Prose => ProseAttribute::ALL
                .into_iter()
                .map(Attribute::Prose)
                .collect(),
        }
    }
}

/// Matches a token within one section's registry.
///
/// # Examples
///
/// ```
/// use ljob_core::{match_in_section, Attribute, AgentInformationAttribute, Section};
///
/// let attr = match_in_section(Section::AgentInformation, "job type");
/// assert_eq!(attr, Some(Attribute::AgentInformation(AgentInformationAttribute::JobType)));
/// assert_eq!(match_in_section(Section::Header, "job type"), None);
/// ```
pub fn match_in_section(section: Section, token: &str) -> Option<Attribute> {
    match section {
        Section::Header => HeaderAttribute::match_token(token).map(Attribute::Header),
        Section::JobInformation => {
            JobInformationAttribute::match_token(token).map(Attribute::JobInformation)
        }
        Section::AgentInformation => {
            AgentInformationAttribute::match_token(token).map(Attribute::AgentInformation)
        }
        Section::Prose => ProseAttribute::match_token(token).map(Attribute::Prose),
    }
}

/// Matches a bare token against every section in [`Section::PRECEDENCE`]
/// order and returns the first hit.
///
/// A label that exists in two sections is shadowed by the earlier section's
/// entry. The registries are currently collision-free; a test guards that
/// this stays true rather than letting shadowing resolve silently.
pub fn match_any_token(token: &str) -> Option<Attribute> {
    Section::PRECEDENCE
        .into_iter()
        .find_map(|section| match_in_section(section, token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_token_is_case_insensitive_and_trimmed() {
        assert_eq!(
            HeaderAttribute::match_token("  job name  "),
            Some(HeaderAttribute::JobName)
        );
        assert_eq!(
            JobInformationAttribute::match_token("schd resolution required"),
            Some(JobInformationAttribute::SchdResolutionRequired)
        );
        assert_eq!(
            AgentInformationAttribute::match_token("USERID"),
            Some(AgentInformationAttribute::Userid)
        );
        assert_eq!(ProseAttribute::match_token("prose"), Some(ProseAttribute::Prose));
        assert_eq!(HeaderAttribute::match_token("JOB"), None);
    }

    #[test]
    fn test_match_token_is_exact_not_partial() {
        assert_eq!(JobInformationAttribute::match_token("LAST"), None);
        assert_eq!(JobInformationAttribute::match_token("LAST RUN EXEC"), None);
        assert_eq!(
            JobInformationAttribute::match_token("EXEC"),
            Some(JobInformationAttribute::LastRunExec)
        );
    }

    #[test]
    fn test_header_column_label_spellings() {
        assert_eq!(
            HeaderAttribute::from_column_label("LAST-RUN DATE/TIME"),
            Some(HeaderAttribute::LastRunDt)
        );
        assert_eq!(
            HeaderAttribute::from_column_label("NUMBER OF STP"),
            Some(HeaderAttribute::NumberOfStp)
        );
        assert_eq!(HeaderAttribute::from_column_label("BOGUS COLUMN"), None);
    }

    #[test]
    fn test_every_token_matches_itself() {
        for section in Section::PRECEDENCE {
            for attr in Attribute::all_in(section) {
                assert_eq!(match_in_section(section, attr.token()), Some(attr));
                assert_eq!(attr.section(), section);
            }
        }
    }

    /// Cross-section collisions would make bare-token lookup shadow one
    /// section's value behind another's. The tables are collision-free
    /// today; this fails loudly if a future edit introduces one.
    #[test]
    fn test_registries_are_collision_free_across_sections() {
        let mut seen: Vec<(&str, Section)> = Vec::new();
        for section in Section::PRECEDENCE {
            for attr in Attribute::all_in(section) {
                if let Some((token, other)) = seen
                    .iter()
                    .find(|(token, _)| token.eq_ignore_ascii_case(attr.token()))
                {
                    panic!(
                        "token {token:?} defined in both {other} and {section}; \
                         bare lookups would shadow the later section"
                    );
                }
                seen.push((attr.token(), section));
            }
        }
    }

    #[test]
    fn test_bare_lookup_resolves_to_first_section_in_precedence() {
        for section in Section::PRECEDENCE {
            for attr in Attribute::all_in(section) {
                let expected = Section::PRECEDENCE
                    .into_iter()
                    .find_map(|candidate| match_in_section(candidate, attr.token()))
                    .expect("token must resolve somewhere");
                assert_eq!(match_any_token(attr.token()), Some(expected));
            }
        }
    }

    #[test]
    fn test_narrative_labels_are_job_information_tokens() {
        for attr in JobInformationAttribute::NARRATIVE {
            assert_eq!(JobInformationAttribute::match_token(attr.token()), Some(attr));
        }
    }
}
