mod cli;

use {
    cli::{Cli, Command},
    clap::Parser,
    qcrypt::{decrypt_file, encrypt_file, QuantumKey},
    std::{fs, process::ExitCode},
};

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(command: Command) -> qcrypt::Result<()> {
    match command {
        Command::Genkey { length, key_path } => {
            log::info!("generating a {length}-byte key");
            let key = QuantumKey::generate(length)?;
            fs::write(&key_path, key.save())?;
            log::info!("wrote key to {key_path}");
        }
        Command::Encrypt { input_path, output_path, key_path } => {
            let key = QuantumKey::load(&fs::read(&key_path)?)?;
            let plaintext = fs::read(&input_path)?;
            log::info!("encrypting {input_path} ({} bytes)", plaintext.len());
            let container = encrypt_file(&key, &plaintext)?;
            fs::write(&output_path, container)?;
        }
        Command::Decrypt { input_path, output_path, key_path } => {
            let key = QuantumKey::load(&fs::read(&key_path)?)?;
            let container = fs::read(&input_path)?;
            log::info!("decrypting {input_path} ({} bytes)", container.len());
            let plaintext = decrypt_file(&key, &container)?;
            fs::write(&output_path, plaintext)?;
        }
        Command::Info { key_path } => {
            let key = QuantumKey::load(&fs::read(&key_path)?)?;
            let info = key.info();
            println!("key_length:      {}", info.key_length);
            println!("pair_count:      {}", info.pair_count);
            println!("lattice_dim:     {}", info.lattice_dim);
            println!("bases_length:    {}", info.bases_length);
            println!("created_at:      {}", info.created_at);
            println!("checksum_prefix: {}", hex::encode(info.checksum_prefix));
        }
    }
    Ok(())
}
