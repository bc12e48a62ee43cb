use std::io::{self, Write};
use std::process::ExitCode;

use exportkit::encode::encode_pkcs8_pem;
use exportkit::key::PrivateKeyHandle;
use exportkit::output::OutputWriter;
use exportkit::store::{FileStoreProvider, PERSONAL_STORE, StoreProvider, StoreScope};

const BANNER: &str = r"
 _  __            ______                       _
| |/ /___ _   _  |  ____|_  ___ __   ___  _ __| |_ ___ _ __
| ' // _ \ | | | | |__  \ \/ / '_ \ / _ \| '__| __/ _ \ '__|
| . \  __/ |_| | |  __|  >  <| |_) | (_) | |  | ||  __/ |
|_|\_\___|\__, | |______/_/\_\ .__/ \___/|_|   \__\___|_|
          __/ |             | |
         |___/              |_|
";

const EXIT_OK: u8 = 0;
const EXIT_STORE_ACCESS: u8 = 1;
const EXIT_NO_MATCH: u8 = 2;
const EXIT_ABORTED: u8 = 3;
const EXIT_EXPORT_FAILED: u8 = 4;
const EXIT_BAD_SELECTION: u8 = 5;

fn main() -> ExitCode {
    ExitCode::from(run())
}

fn run() -> u8 {
    println!("{BANNER}");

    println!("Select certificate store location:");
    println!("1) Current User (default)");
    println!("2) Local Machine");
    println!();
    let Some(choice) = prompt("Enter your choice (1 or 2): ") else {
        return EXIT_ABORTED;
    };
    let scope = match choice.as_str() {
        "1" => StoreScope::CurrentUser,
        "2" => StoreScope::LocalMachine,
        _ => {
            println!("Invalid choice. Defaulting to Current User.");
            StoreScope::CurrentUser
        }
    };
    println!();

    let provider = FileStoreProvider::host();
    let store = match provider.open(scope, PERSONAL_STORE) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("{err}");
            eprintln!(
                "Check that you have the privileges required to read the {scope} store, then run again."
            );
            return EXIT_STORE_ACCESS;
        }
    };

    let Some(fragment) =
        prompt("Enter the subject name (or part) of the certificate to search for: ")
    else {
        return EXIT_ABORTED;
    };
    let matches = store.find(&fragment);
    println!();

    if matches.is_empty() {
        println!("No certificates were found for the given subject name.");
        return EXIT_NO_MATCH;
    }

    println!("Select a certificate:");
    println!("0) NOT LISTED");
    for (index, record) in matches.iter().enumerate() {
        println!(
            "{}) Subject: {}, Issuer: {}, Created: {}, Key Exists: {}",
            index + 1,
            record.subject,
            record.issuer,
            record.not_before,
            record.has_private_key()
        );
    }
    println!();

    let Some(selection) = prompt("Enter your choice: ") else {
        return EXIT_ABORTED;
    };
    println!();

    let Ok(selection) = selection.parse::<usize>() else {
        println!("Invalid selection. Exiting.");
        return EXIT_BAD_SELECTION;
    };
    if selection == 0 {
        println!("No certificate selected. Exiting.");
        return EXIT_ABORTED;
    }
    let Some(record) = matches.get(selection - 1).map(|r| (*r).clone()) else {
        println!("Invalid selection. Exiting.");
        return EXIT_BAD_SELECTION;
    };
    // Extraction works on the materialized record; release the store first.
    drop(matches);
    drop(store);

    let key = match PrivateKeyHandle::extract(&record) {
        Ok(key) => key,
        Err(err) => {
            eprintln!("{err}");
            return EXIT_EXPORT_FAILED;
        }
    };
    println!("{} private key found.", key.algorithm());
    println!();

    let pem = match encode_pkcs8_pem(&key) {
        Ok(pem) => pem,
        Err(err) => {
            eprintln!("{err}");
            return EXIT_EXPORT_FAILED;
        }
    };

    let writer = OutputWriter::documents();
    loop {
        let Some(name) = prompt("Enter a file name to which the private key will be saved: ")
        else {
            return EXIT_ABORTED;
        };
        let path = match writer.resolve(&name) {
            Ok(path) => path,
            Err(_) => {
                println!("The path that was entered is not valid. Please try again.");
                continue;
            }
        };
        println!("The private key will be saved to: {}", path.display());
        println!(
            "The private key will not be encrypted. Protect it, and delete any copies after installation or use!"
        );
        let Some(confirmation) = prompt("Agree to proceed? (Y/N): ") else {
            return EXIT_ABORTED;
        };
        match confirmation.to_lowercase().as_str() {
            "y" | "yes" => {
                return match writer.write(&path, &pem) {
                    Ok(()) => {
                        println!(
                            "Private key saved as PEM encoded version of the PKCS#8 format to '{}'",
                            path.display()
                        );
                        EXIT_OK
                    }
                    Err(err) => {
                        eprintln!("{err}");
                        EXIT_EXPORT_FAILED
                    }
                };
            }
            _ => println!("Please enter a new file name."),
        }
    }
}

/// Reads one trimmed line from stdin. Returns `None` on end of input or a
/// read failure, which callers treat as aborting the run.
fn prompt(label: &str) -> Option<String> {
    print!("{label}");
    if io::stdout().flush().is_err() {
        return None;
    }
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(err) => {
            eprintln!("Failed to read input: {err}");
            None
        }
    }
}
