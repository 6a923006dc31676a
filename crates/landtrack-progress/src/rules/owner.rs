//! Owner Details rule
//!
//! Binary: a lot either has an owner assignment or it does not.

use super::{Assessment, SectionRule};
use crate::section::Section;
use landtrack_snapshot::LotSnapshot;

/// At least one owner must be linked
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnerRule;

impl OwnerRule {
    /// Label reported when no owner is linked
    pub const MISSING_OWNER: &'static str = "owner assignment";
}

impl SectionRule for OwnerRule {
    fn section(&self) -> Section {
        Section::OwnerDetails
    }

    fn assess(&self, snapshot: &LotSnapshot) -> Assessment {
        if snapshot.owners.is_empty() {
            Assessment::not_started(&[Self::MISSING_OWNER])
        } else {
            Assessment::complete()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landtrack_snapshot::{LotId, OwnerId, OwnerLink, PlanId};

    #[test]
    fn no_owner_is_not_started() {
        let snap = LotSnapshot::new(LotId::new(1), PlanId::new(1));
        let a = OwnerRule.assess(&snap);
        assert_eq!(a.completeness, 0.0);
        assert_eq!(a.missing, vec!["owner assignment".to_string()]);
    }

    #[test]
    fn any_owner_completes() {
        let snap = LotSnapshot::new(LotId::new(1), PlanId::new(1))
            .with_owner(OwnerLink::new(OwnerId::new(2), 0.0));
        assert_eq!(OwnerRule.assess(&snap), Assessment::complete());
    }
}
