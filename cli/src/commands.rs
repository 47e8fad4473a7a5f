use std::sync::Arc;
use std::time::Duration;

use discfx_core::{
    Catalog, EffectGrant, EffectKind, EffectSubsystem, EntityId, Hand, ItemId, Scheduler,
    TickReport, TriggerUpdate,
};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::parse_flag;
use crate::state::AppState;

type Reply = Result<(), String>;

fn lookup(state: &AppState, name: &str) -> Result<EntityId, String> {
    state
        .host
        .find(name)
        .ok_or_else(|| format!("No player named {name}\n"))
}

fn mode(infinite: bool) -> &'static str {
    if infinite { "infinite" } else { "refreshed" }
}

// ─────────────────────────────────────────────────────────────────────────────
// Trigger administration
// ─────────────────────────────────────────────────────────────────────────────

pub async fn reload(state: Arc<RwLock<AppState>>) -> Reply {
    let s = state.read().await;
    let count = s.engine.reload().map_err(|e| format!("Reload failed: {e}\n"))?;
    println!("Reloaded {count} disc effect configurations");
    Ok(())
}

#[derive(Serialize)]
struct ListedTrigger<'a> {
    disc: &'a ItemId,
    effect: EffectKind,
    level: u8,
    infinite: bool,
}

pub async fn list(state: Arc<RwLock<AppState>>, json: bool) -> Reply {
    let s = state.read().await;
    let text = render_list(&s.engine.list_configured_triggers(), json)?;
    println!("{text}");
    Ok(())
}

fn render_list(catalog: &Catalog, json: bool) -> Result<String, String> {
    if json {
        let rows: Vec<ListedTrigger> = catalog
            .iter()
            .map(|(disc, d)| ListedTrigger {
                disc,
                effect: d.kind,
                level: d.amplifier,
                infinite: d.infinite,
            })
            .collect();
        return serde_json::to_string_pretty(&rows).map_err(|e| e.to_string());
    }

    let mut text = match catalog.loaded_at() {
        Some(at) => format!(
            "{} disc effects (loaded {})",
            catalog.len(),
            at.format("%Y-%m-%d %H:%M:%S")
        ),
        None => format!("{} disc effects", catalog.len()),
    };
    for (disc, d) in catalog.iter() {
        text.push_str(&format!(
            "\n  {disc:<24} {} {} ({})",
            d.kind,
            d.amplifier,
            mode(d.infinite)
        ));
    }
    Ok(text)
}

pub async fn set_trigger(
    state: Arc<RwLock<AppState>>,
    disc: &str,
    effect: &str,
    level: &str,
    infinite: Option<&str>,
) -> Reply {
    let s = state.read().await;
    let update = s
        .engine
        .set_trigger(disc, effect, level, parse_flag(infinite))
        .map_err(|e| format!("{e}\n"))?;
    match update {
        TriggerUpdate::Set { item, descriptor } => println!(
            "Set {item} to {} {} ({})",
            descriptor.kind,
            descriptor.amplifier,
            mode(descriptor.infinite)
        ),
        TriggerUpdate::Cleared { item } => println!("Cleared {item}"),
    }
    Ok(())
}

pub async fn clear_trigger(state: Arc<RwLock<AppState>>, disc: &str) -> Reply {
    let s = state.read().await;
    let item = s.engine.clear_trigger(disc).map_err(|e| format!("{e}\n"))?;
    println!("Cleared {item}");
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Simulated server
// ─────────────────────────────────────────────────────────────────────────────

pub async fn join(state: Arc<RwLock<AppState>>, name: &str) -> Reply {
    let mut s = state.write().await;
    if s.host.find(name).is_some() {
        return Err(format!("{name} is already online\n"));
    }
    let id = s.host.join(name);
    println!("{name} joined as {id}");
    Ok(())
}

pub async fn leave(state: Arc<RwLock<AppState>>, name: &str) -> Reply {
    let mut s = state.write().await;
    let id = lookup(&s, name)?;
    s.host.leave(id);
    println!("{name} left");
    Ok(())
}

pub async fn hold(state: Arc<RwLock<AppState>>, name: &str, hand: Hand, item: &str) -> Reply {
    let mut s = state.write().await;
    let id = lookup(&s, name)?;
    let item = (!item.eq_ignore_ascii_case("empty")).then(|| ItemId::new(item));
    s.host.set_hand(id, hand, item);
    Ok(())
}

/// Apply an effect the way another plugin would: visible and unowned
pub async fn grant(
    state: Arc<RwLock<AppState>>,
    name: &str,
    effect: &str,
    level: u8,
    ticks: u32,
) -> Reply {
    let mut s = state.write().await;
    let id = lookup(&s, name)?;
    let kind: EffectKind = effect.parse().map_err(|e| format!("{e}\n"))?;
    s.host.grant_effect(id, EffectGrant::visible(kind, level, ticks));
    Ok(())
}

pub async fn status(state: Arc<RwLock<AppState>>, name: Option<&str>) -> Reply {
    let s = state.read().await;
    let only = name.map(|n| lookup(&s, n)).transpose()?;
    let ledger = s.engine.ledger();

    for (id, player) in s.host.players() {
        if only.is_some_and(|o| o != id) {
            continue;
        }
        let hand = |item: &Option<ItemId>| item.as_ref().map_or("-".to_string(), ItemId::to_string);
        println!(
            "{id} {}  main: {}  off: {}",
            player.name,
            hand(&player.main_hand),
            hand(&player.off_hand)
        );
        for (kind, active) in player.effects() {
            let owner = if ledger.is_marked(id, kind) { "disc" } else { "other" };
            println!(
                "    {kind} {} ({} ticks) [{owner}]",
                active.amplifier, active.remaining
            );
        }
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Driving the engine
// ─────────────────────────────────────────────────────────────────────────────

fn accumulate(totals: &mut TickReport, report: TickReport) {
    totals.entities = report.entities;
    totals.grants += report.grants;
    totals.releases += report.releases;
    totals.forgotten += report.forgotten;
}

fn print_totals(passes: u64, totals: &TickReport) {
    println!(
        "{passes} passes: {} grants, {} releases, {} forgotten ({} online)",
        totals.grants, totals.releases, totals.forgotten, totals.entities
    );
}

pub async fn tick(state: Arc<RwLock<AppState>>, count: u32) -> Reply {
    let mut s = state.write().await;
    let mut totals = TickReport::default();
    for _ in 0..count {
        let report = s.pass();
        accumulate(&mut totals, report);
    }
    print_totals(u64::from(count), &totals);
    Ok(())
}

/// Start the real scheduler in the background for `seconds` of wall time.
/// The REPL stays usable, so edits and reloads land between passes.
pub async fn run(state: Arc<RwLock<AppState>>, seconds: u64) -> Reply {
    let scheduler = {
        let s = state.read().await;
        if s.is_running() {
            return Err("A run is already in progress\n".to_string());
        }
        Scheduler::new(s.engine.timing())
    };

    let handle = tokio::spawn(drive(scheduler, Arc::clone(&state), seconds));
    state.write().await.runner = Some(handle);
    println!("Running for {seconds}s");
    Ok(())
}

/// Each pass holds the state lock only while it runs. A pass that finds the
/// lock taken by a command is skipped, like a late tick.
async fn drive(scheduler: Scheduler, state: Arc<RwLock<AppState>>, seconds: u64) -> u64 {
    let mut totals = TickReport::default();
    let mut skipped = 0;

    let passes = scheduler
        .schedule_repeating(
            || match state.try_write() {
                Ok(mut s) => accumulate(&mut totals, s.pass()),
                Err(_) => skipped += 1,
            },
            tokio::time::sleep(Duration::from_secs(seconds)),
        )
        .await;

    if skipped > 0 {
        tracing::debug!(skipped, "Passes skipped while a command held the state");
    }
    let ran = passes - skipped;
    print_totals(ran, &totals);
    ran
}

pub async fn show_settings(state: Arc<RwLock<AppState>>) -> Reply {
    let s = state.read().await;
    let settings = &s.settings;
    let timing = s.engine.timing();
    println!("Trigger file:      {}", settings.trigger_file().display());
    println!("Trigger prefix:    {}", settings.trigger_prefix);
    println!(
        "Trigger items:     {}",
        s.engine.catalogs().registry().items().len()
    );
    println!(
        "Tick interval:     {} ticks ({:?})",
        timing.tick_interval,
        timing.tick_period()
    );
    println!("Infinite duration: {} ticks", timing.infinite_duration);
    println!("Normal duration:   {} ticks", timing.normal_duration);
    println!("Refresh threshold: {} ticks", timing.refresh_threshold);
    Ok(())
}

pub fn exit() {
    println!("Exiting...");
}
