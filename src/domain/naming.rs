//! Droplet name generation
//!
//! Names follow `[<prefix>-]<image>-<size>-<region>-<slug>` where the slug is a
//! random adjective-noun pair such as `brave-otter`.

use rand::seq::SliceRandom;
use rand::Rng;

const ADJECTIVES: &[&str] = &[
    "able", "agile", "amber", "ample", "amused", "apt", "awake", "bold", "brave", "bright",
    "brisk", "calm", "candid", "careful", "charmed", "cheery", "civil", "clever", "cosmic",
    "cozy", "crisp", "curious", "daring", "dapper", "deep", "eager", "earnest", "easy",
    "epic", "exact", "fair", "fancy", "fast", "fine", "fluent", "fond", "frank", "free",
    "fresh", "gentle", "glad", "golden", "grand", "happy", "hardy", "hearty", "honest",
    "humble", "ideal", "jolly", "keen", "kind", "lively", "loyal", "lucid", "lucky",
    "mellow", "merry", "mighty", "modest", "neat", "nimble", "noble", "open", "patient",
    "plucky", "polite", "proud", "quick", "quiet", "rapid", "ready", "robust", "rosy",
    "rugged", "safe", "sharp", "shiny", "silent", "sleek", "smart", "snappy", "solid",
    "steady", "sunny", "super", "swift", "tidy", "tender", "tough", "trusty", "upbeat",
    "valid", "vast", "vivid", "warm", "wise", "witty", "zany", "zesty",
];

const NOUNS: &[&str] = &[
    "alpaca", "badger", "beagle", "bear", "beaver", "bison", "bobcat", "buffalo", "camel",
    "caribou", "cat", "cheetah", "cobra", "condor", "corgi", "cougar", "coyote", "crane",
    "crow", "deer", "dingo", "dodo", "dolphin", "dove", "eagle", "eel", "egret", "elk",
    "emu", "falcon", "ferret", "finch", "fox", "gecko", "gibbon", "goose", "gopher",
    "grouse", "gull", "hare", "hawk", "heron", "hippo", "horse", "hound", "ibex", "ibis",
    "iguana", "impala", "jackal", "jaguar", "jay", "koala", "lark", "lemur", "leopard",
    "lion", "llama", "lynx", "macaw", "magpie", "mako", "marten", "mink", "mole", "moose",
    "narwhal", "newt", "ocelot", "orca", "osprey", "otter", "owl", "panda", "panther",
    "parrot", "pelican", "penguin", "puffin", "puma", "quail", "rabbit", "raven", "robin",
    "salmon", "seal", "shark", "sloth", "snipe", "sparrow", "stork", "swan", "tapir",
    "tiger", "toucan", "trout", "turtle", "viper", "walrus", "weasel", "whale", "wombat",
    "wren", "yak", "zebra",
];

/// Random hyphen-joined adjective-noun pair.
pub fn random_slug<R: Rng + ?Sized>(rng: &mut R) -> String {
    let adjective = ADJECTIVES.choose(rng).copied().unwrap_or("brave");
    let noun = NOUNS.choose(rng).copied().unwrap_or("otter");
    format!("{adjective}-{noun}")
}

/// Compose a droplet name; an empty prefix contributes no segment.
pub fn droplet_name(prefix: &str, image: &str, size: &str, region: &str, slug: &str) -> String {
    if prefix.is_empty() {
        format!("{image}-{size}-{region}-{slug}")
    } else {
        format!("{prefix}-{image}-{size}-{region}-{slug}")
    }
}
