// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Emergency protocol catalog and matcher
//!
//! Maps a matched emergency trigger set to one canonical protocol describing
//! the response level, user-facing banner, and follow-up obligations. The
//! catalog is scanned in declaration order and the first entry whose trigger
//! set intersects the matched keywords wins, so the most severe protocols
//! are listed first.

use serde::{Deserialize, Serialize};

/// How fast the escalation response must be surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseLevel {
    Immediate,
    Urgent,
}

/// User-facing escalation response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolResponse {
    pub level: ResponseLevel,
    pub banner_message: String,
    pub action_label: String,
    pub action_target: String,
}

/// Follow-up obligations once the protocol fires
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolFollowUp {
    pub log_event: bool,
    pub notify_support: bool,
    pub create_incident: bool,
}

/// A canned escalation response selected when critical triggers are found
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyProtocol {
    pub triggers: Vec<String>,
    pub response: ProtocolResponse,
    pub follow_up: ProtocolFollowUp,
}

struct ProtocolDef {
    triggers: &'static [&'static str],
    level: ResponseLevel,
    banner: &'static str,
    action_label: &'static str,
    action_target: &'static str,
    notify_support: bool,
    create_incident: bool,
}

impl ProtocolDef {
    fn materialize(&self) -> EmergencyProtocol {
        EmergencyProtocol {
            triggers: self.triggers.iter().map(|t| t.to_string()).collect(),
            response: ProtocolResponse {
                level: self.level,
                banner_message: self.banner.to_string(),
                action_label: self.action_label.to_string(),
                action_target: self.action_target.to_string(),
            },
            follow_up: ProtocolFollowUp {
                log_event: true,
                notify_support: self.notify_support,
                create_incident: self.create_incident,
            },
        }
    }
}

const PROTOCOL_CATALOG: &[ProtocolDef] = &[
    ProtocolDef {
        triggers: &[
            "non respira",
            "fatica a respirare",
            "difficoltà a respirare",
            "soffoca",
            "soffocando",
            "corpo estraneo",
            "ha ingoiato",
        ],
        level: ResponseLevel::Immediate,
        banner: "Possibile emergenza respiratoria. Porta subito il tuo animale dal veterinario \
                 o al pronto soccorso veterinario più vicino.",
        action_label: "Trova un pronto soccorso",
        action_target: "/emergency/vet-search",
        notify_support: true,
        create_incident: true,
    },
    ProtocolDef {
        triggers: &[
            "avvelenato",
            "avvelenamento",
            "veleno",
            "intossicato",
            "topicida",
            "ha mangiato cioccolato",
        ],
        level: ResponseLevel::Immediate,
        banner: "Sospetto avvelenamento. Non indurre il vomito e contatta immediatamente un \
                 veterinario o un centro antiveleni.",
        action_label: "Chiama un veterinario",
        action_target: "/emergency/vet-search",
        notify_support: true,
        create_incident: true,
    },
    ProtocolDef {
        triggers: &[
            "convulsioni",
            "crisi epilettica",
            "svenuto",
            "privo di sensi",
            "incosciente",
        ],
        level: ResponseLevel::Immediate,
        banner: "Convulsioni o perdita di coscienza richiedono assistenza veterinaria immediata. \
                 Metti l'animale in sicurezza e contatta subito un veterinario.",
        action_label: "Trova un pronto soccorso",
        action_target: "/emergency/vet-search",
        notify_support: true,
        create_incident: true,
    },
    ProtocolDef {
        triggers: &[
            "sanguina molto",
            "emorragia",
            "perde molto sangue",
            "investito",
            "trauma",
        ],
        level: ResponseLevel::Immediate,
        banner: "Possibile trauma o emorragia. Applica una pressione delicata sulla ferita e \
                 raggiungi subito un veterinario.",
        action_label: "Trova un pronto soccorso",
        action_target: "/emergency/vet-search",
        notify_support: true,
        create_incident: false,
    },
    ProtocolDef {
        triggers: &[
            "non riesce a muoversi",
            "paralizzato",
            "non si alza",
            "shock",
            "gengive bianche",
            "gengive pallide",
            "colpo di calore",
            "temperatura altissima",
            "ipotermia",
        ],
        level: ResponseLevel::Urgent,
        banner: "Questi segni possono indicare una condizione grave. Contatta un veterinario \
                 il prima possibile.",
        action_label: "Trova un veterinario",
        action_target: "/emergency/vet-search",
        notify_support: false,
        create_incident: false,
    },
];

/// Select the protocol for a matched trigger set. First catalog entry whose
/// trigger set intersects the matches wins.
pub fn match_protocol(matched_triggers: &[&str]) -> Option<EmergencyProtocol> {
    PROTOCOL_CATALOG
        .iter()
        .find(|def| {
            def.triggers
                .iter()
                .any(|trigger| matched_triggers.contains(trigger))
        })
        .map(ProtocolDef::materialize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::safety::rules::TIER1_EMERGENCY_TRIGGERS;

    #[test]
    fn test_every_tier1_trigger_has_a_protocol() {
        for trigger in TIER1_EMERGENCY_TRIGGERS {
            assert!(
                match_protocol(&[trigger]).is_some(),
                "no protocol covers trigger {}",
                trigger
            );
        }
    }

    #[test]
    fn test_catalog_triggers_are_tier1_triggers() {
        for def in PROTOCOL_CATALOG {
            for trigger in def.triggers {
                assert!(
                    TIER1_EMERGENCY_TRIGGERS.contains(trigger),
                    "catalog trigger {} missing from tier 1 table",
                    trigger
                );
            }
        }
    }

    #[test]
    fn test_first_intersecting_entry_wins() {
        // Both respiratory and seizure triggers matched: the respiratory
        // protocol is declared first and must win.
        let protocol = match_protocol(&["convulsioni", "non respira"]).unwrap();
        assert!(protocol.triggers.contains(&"non respira".to_string()));
        assert_eq!(protocol.response.level, ResponseLevel::Immediate);
    }

    #[test]
    fn test_no_match_returns_none() {
        assert!(match_protocol(&["starnutisce"]).is_none());
        assert!(match_protocol(&[]).is_none());
    }

    #[test]
    fn test_follow_up_obligations() {
        let poisoning = match_protocol(&["veleno"]).unwrap();
        assert!(poisoning.follow_up.log_event);
        assert!(poisoning.follow_up.notify_support);
        assert!(poisoning.follow_up.create_incident);

        let collapse = match_protocol(&["gengive pallide"]).unwrap();
        assert!(collapse.follow_up.log_event);
        assert!(!collapse.follow_up.notify_support);
        assert_eq!(collapse.response.level, ResponseLevel::Urgent);
    }

    #[test]
    fn test_protocol_serialization() {
        let protocol = match_protocol(&["non respira"]).unwrap();
        let json = serde_json::to_string(&protocol).unwrap();
        assert!(json.contains("bannerMessage"));
        assert!(json.contains("followUp"));
        assert!(json.contains("\"immediate\""));
    }
}
