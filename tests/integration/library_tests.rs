//! Drives the library directly with a fixed search path and recorded events.

use std::path::PathBuf;

use tempfile::TempDir;
use workshop_manager::coordinator::{Coordinator, UpdateOutcome};
use workshop_manager::events::{Event, LinkScope, RecordingSink};
use workshop_manager::ledger::Ledger;
use workshop_manager::linker::{LinkOutcome, Linker, SystemLink};
use workshop_manager::paths::{FixedSearchPath, PathResolver};
use workshop_manager::source::DirectoryMaterializer;
use workshop_manager::workshop::{Release, Workshop};

struct Setup {
    temp: TempDir,
    paths: PathResolver,
}

impl Setup {
    fn new(system_exists: bool) -> Self {
        let temp = TempDir::new().unwrap();
        let system = temp.path().join("system-bin");
        if system_exists {
            std::fs::create_dir_all(&system).unwrap();
        }
        let paths = PathResolver::with_system_bin_dir(temp.path().join("root"), system);
        Self { temp, paths }
    }

    fn coordinator(&self) -> Coordinator<FixedSearchPath, RecordingSink> {
        let ledger = Ledger::load(self.paths.ledger_path()).unwrap();
        let linker = Linker::new(
            self.paths.clone(),
            FixedSearchPath::new("/usr/bin:/bin"),
            RecordingSink::new(),
        );
        Coordinator::new(ledger, linker, Box::new(DirectoryMaterializer))
    }

    fn release(&self, name: &str, tag: &str) -> Release {
        let dir: PathBuf = self.temp.path().join(format!("{name}-{tag}"));
        std::fs::create_dir_all(dir.join("bin")).unwrap();
        std::fs::write(dir.join("bin").join(name), format!("#!/bin/sh\necho {tag}\n")).unwrap();
        Release::new(tag, dir.to_string_lossy())
    }
}

fn workshop(name: &str) -> Workshop {
    Workshop::new(name, "Learn You", "workshops", name, "An interactive workshop")
}

#[test]
fn ledger_persists_across_coordinators() {
    let setup = Setup::new(true);
    let mut first = setup.coordinator();
    first
        .install(&workshop("learnyou"), &setup.release("learnyou", "1.0.0"), false)
        .unwrap();
    drop(first);

    let second = setup.coordinator();
    let record = second.ledger().get_by_name("learnyou").unwrap();
    assert_eq!(record.version, "1.0.0");
    assert_eq!(record.display_name, "Learn You");
}

#[test]
fn install_events_in_order() {
    let setup = Setup::new(true);
    let mut coordinator = setup.coordinator();
    coordinator
        .install(&workshop("demo"), &setup.release("demo", "1.0.0"), false)
        .unwrap();

    let events = coordinator.linker().sink().events();
    assert!(matches!(&events[0], Event::Installed { version, .. } if version == "1.0.0"));
    assert!(matches!(
        &events[1],
        Event::Linked {
            scope: LinkScope::Local,
            ..
        }
    ));
    assert!(matches!(
        &events[2],
        Event::Linked {
            scope: LinkScope::System,
            ..
        }
    ));
    assert!(coordinator.linker().sink().advisories().is_empty());
}

#[test]
fn missing_system_dir_installs_locally() {
    let setup = Setup::new(false);
    let mut coordinator = setup.coordinator();

    let outcome = coordinator
        .install(&workshop("demo"), &setup.release("demo", "1.0.0"), false)
        .unwrap();

    assert!(matches!(
        outcome.link,
        LinkOutcome::Linked {
            system: SystemLink::SkippedUnwritable { .. },
            ..
        }
    ));
    let advisories = coordinator.linker().sink().advisories();
    assert_eq!(advisories.len(), 1);
    match &advisories[0] {
        Event::SystemUnwritable {
            local_bin_dir,
            store_binary,
            ..
        } => {
            assert_eq!(local_bin_dir, &setup.paths.local_bin_dir());
            assert_eq!(store_binary, &setup.paths.store_binary("demo"));
        }
        other => panic!("unexpected advisory: {other:?}"),
    }
    assert!(coordinator.ledger().has_workshop("demo"));
}

#[test]
fn update_then_uninstall() {
    let setup = Setup::new(true);
    let mut coordinator = setup.coordinator();
    coordinator
        .install(&workshop("demo"), &setup.release("demo", "1.0.0"), false)
        .unwrap();

    let outcome = coordinator
        .update("demo", &setup.release("demo", "1.1.0"), false)
        .unwrap();
    assert!(matches!(outcome, UpdateOutcome::Updated { .. }));
    assert_eq!(
        std::fs::read_to_string(setup.paths.system_bin("demo")).unwrap(),
        "#!/bin/sh\necho 1.1.0\n"
    );

    coordinator.uninstall("demo", false).unwrap();
    assert!(coordinator.ledger().is_empty());
    assert!(std::fs::symlink_metadata(setup.paths.system_bin("demo")).is_err());
    assert!(
        coordinator
            .linker()
            .sink()
            .events()
            .iter()
            .any(|e| matches!(e, Event::Uninstalled { .. }))
    );
}
