//! Collection database layout (legacy schema version 11)
//!
//! The `col` table carries the models, decks and deck options as JSON
//! blobs; notes and cards are plain rows.

use serde_json::{json, Value};

use crate::deck::template::{
    required_field_ords, DeckIdentity, FIELD_NAMES, MODEL_CSS, TEMPLATES,
};

pub const SCHEMA_VERSION: i64 = 11;

/// Id of the built-in default deck every collection carries
pub const DEFAULT_DECK_ID: i64 = 1;

/// Separator between field values in `notes.flds`
pub const FIELD_SEPARATOR: &str = "\x1f";

pub const SCHEMA_SQL: &str = r#"
CREATE TABLE col (
    id              integer primary key,
    crt             integer not null,
    mod             integer not null,
    scm             integer not null,
    ver             integer not null,
    dty             integer not null,
    usn             integer not null,
    ls              integer not null,
    conf            text not null,
    models          text not null,
    decks           text not null,
    dconf           text not null,
    tags            text not null
);
CREATE TABLE notes (
    id              integer primary key,
    guid            text not null,
    mid             integer not null,
    mod             integer not null,
    usn             integer not null,
    tags            text not null,
    flds            text not null,
    sfld            integer not null,
    csum            integer not null,
    flags           integer not null,
    data            text not null
);
CREATE TABLE cards (
    id              integer primary key,
    nid             integer not null,
    did             integer not null,
    ord             integer not null,
    mod             integer not null,
    usn             integer not null,
    type            integer not null,
    queue           integer not null,
    due             integer not null,
    ivl             integer not null,
    factor          integer not null,
    reps            integer not null,
    lapses          integer not null,
    left            integer not null,
    odue            integer not null,
    odid            integer not null,
    flags           integer not null,
    data            text not null
);
CREATE TABLE revlog (
    id              integer primary key,
    cid             integer not null,
    usn             integer not null,
    ease            integer not null,
    ivl             integer not null,
    lastIvl         integer not null,
    factor          integer not null,
    time            integer not null,
    type            integer not null
);
CREATE TABLE graves (
    usn             integer not null,
    oid             integer not null,
    type            integer not null
);
CREATE INDEX ix_notes_usn on notes (usn);
CREATE INDEX ix_cards_usn on cards (usn);
CREATE INDEX ix_revlog_usn on revlog (usn);
CREATE INDEX ix_cards_nid on cards (nid);
CREATE INDEX ix_cards_sched on cards (did, queue, due);
CREATE INDEX ix_revlog_cid on revlog (cid);
CREATE INDEX ix_notes_csum on notes (csum);
"#;

const LATEX_PRE: &str = "\\documentclass[12pt]{article}\n\\special{papersize=3in,5in}\n\\usepackage[utf8]{inputenc}\n\\usepackage{amssymb,amsmath}\n\\pagestyle{empty}\n\\setlength{\\parindent}{0in}\n\\begin{document}\n";
const LATEX_POST: &str = "\\end{document}";

/// `col.conf`: collection-wide preferences
pub fn collection_conf(identity: &DeckIdentity) -> Value {
    json!({
        "activeDecks": [DEFAULT_DECK_ID],
        "addToCur": true,
        "collapseTime": 1200,
        "curDeck": DEFAULT_DECK_ID,
        "curModel": identity.model_id.to_string(),
        "dueCounts": true,
        "estTimes": true,
        "newBury": true,
        "newSpread": 0,
        "nextPos": 1,
        "sortBackwards": false,
        "sortType": "noteFld",
        "timeLim": 0,
    })
}

/// `col.models`: the single vocabulary note model, keyed by id
pub fn models_json(identity: &DeckIdentity, modified: i64) -> Value {
    let fields: Vec<Value> = FIELD_NAMES
        .iter()
        .enumerate()
        .map(|(ord, name)| {
            json!({
                "font": "Liberation Sans",
                "media": [],
                "name": name,
                "ord": ord,
                "rtl": false,
                "size": 20,
                "sticky": false,
            })
        })
        .collect();

    let templates: Vec<Value> = TEMPLATES
        .iter()
        .enumerate()
        .map(|(ord, template)| {
            json!({
                "afmt": template.afmt,
                "bafmt": "",
                "bqfmt": "",
                "did": null,
                "name": template.name,
                "ord": ord,
                "qfmt": template.qfmt,
            })
        })
        .collect();

    let req: Vec<Value> = TEMPLATES
        .iter()
        .enumerate()
        .map(|(ord, template)| json!([ord, "any", required_field_ords(template)]))
        .collect();

    let model = json!({
        "css": MODEL_CSS,
        "did": identity.deck_id,
        "flds": fields,
        "id": identity.model_id.to_string(),
        "latexPost": LATEX_POST,
        "latexPre": LATEX_PRE,
        "latexsvg": false,
        "mod": modified,
        "name": identity.model_name,
        "req": req,
        "sortf": 0,
        "tags": [],
        "tmpls": templates,
        "type": 0,
        "usn": -1,
        "vers": [],
    });

    json!({ identity.model_id.to_string(): model })
}

fn deck_entry(id: i64, name: &str, modified: i64) -> Value {
    json!({
        "collapsed": false,
        "conf": 1,
        "desc": "",
        "dyn": 0,
        "extendNew": 0,
        "extendRev": 50,
        "id": id,
        "lrnToday": [0, 0],
        "mod": modified,
        "name": name,
        "newToday": [0, 0],
        "revToday": [0, 0],
        "timeToday": [0, 0],
        "usn": -1,
    })
}

/// `col.decks`: the default deck plus the vocabulary deck
pub fn decks_json(identity: &DeckIdentity, modified: i64) -> Value {
    json!({
        DEFAULT_DECK_ID.to_string(): deck_entry(DEFAULT_DECK_ID, "Default", modified),
        identity.deck_id.to_string(): deck_entry(identity.deck_id, &identity.deck_name, modified),
    })
}

/// `col.dconf`: default review options
pub fn deck_options_json() -> Value {
    json!({
        "1": {
            "autoplay": true,
            "id": 1,
            "lapse": {
                "delays": [10],
                "leechAction": 0,
                "leechFails": 8,
                "minInt": 1,
                "mult": 0,
            },
            "maxTaken": 60,
            "mod": 0,
            "name": "Default",
            "new": {
                "bury": true,
                "delays": [1, 10],
                "initialFactor": 2500,
                "ints": [1, 4, 7],
                "order": 1,
                "perDay": 20,
                "separate": true,
            },
            "replayq": true,
            "rev": {
                "bury": true,
                "ease4": 1.3,
                "fuzz": 0.05,
                "ivlFct": 1,
                "maxIvl": 36500,
                "minSpace": 1,
                "perDay": 100,
            },
            "timer": 0,
            "usn": 0,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_models_json_shape() {
        let identity = DeckIdentity::default();
        let models = models_json(&identity, 0);
        let model = &models["1607392319"];

        assert_eq!(model["name"], "Word Model");
        assert_eq!(model["flds"].as_array().unwrap().len(), 7);
        assert_eq!(model["flds"][4]["name"], "WordAudio");
        assert_eq!(model["tmpls"][0]["name"], "Card 1");
        assert_eq!(model["req"][0], json!([0, "any", [0, 1, 4]]));
        assert_eq!(model["did"], 2059400110);
    }

    #[test]
    fn test_decks_json_contains_default_and_vocab_deck() {
        let mut identity = DeckIdentity::default();
        identity.deck_name = "Spanish".to_string();
        let decks = decks_json(&identity, 0);

        assert_eq!(decks["1"]["name"], "Default");
        assert_eq!(decks["2059400110"]["name"], "Spanish");
        assert_eq!(decks["2059400110"]["id"], 2059400110);
    }
}
