use std::io::Write;
use std::path::Path;

use crate::{
    csv_utils::write_csv,
    dto::{CartOperation, CartRow},
    provider::CartHandle,
    runner::command::Command,
    Error,
};

use csv_async::{AsyncReaderBuilder, Trim};
use tokio::fs::File;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tracing::{debug, warn};

const BUFFER_SIZE: usize = 1024;

/// Applies a CSV script of cart operations to `cart` and writes the final cart to `writer`.
/// Spawns two tasks:
/// * CSV reader - streams operations from the script, deserializes them and sends them to the processor via channel.
/// * Processor - receives operations from the channel and applies them to the cart until the channel is closed.
///
/// Once both are done the cart's pending storage writes are settled before the listing is written.
///
/// # Arguments
/// * `input_path` - Path to the CSV script (`type,id,title,image_url,price`)
/// * `cart` - The mounted cart to apply the script to
/// * `writer` - Where to write the final cart (e.g. stdout)
///
/// # Errors
/// Returns an error if:
/// * The script cannot be read
/// * The CSV is malformed
/// * Writing to the output fails
pub async fn run<P, W>(input_path: P, cart: CartHandle, writer: W) -> Result<(), Error>
where
    P: AsRef<Path>,
    W: Write,
{
    let (tx, rx) = mpsc::channel(BUFFER_SIZE);
    let input_path = input_path.as_ref().to_owned();

    let reader_handle = tokio::spawn(read_operations(input_path, tx));
    let processor_handle = tokio::spawn(process_operations(rx, cart.clone()));

    // Wait for reader to finish and propagate any errors
    reader_handle.await??;
    let applied = processor_handle.await?;
    debug!(applied, "script applied");

    cart.settle().await;

    write_csv(writer, cart.items().into_iter().map(CartRow::from))?;
    Ok(())
}

/// Reads and deserializes operations from a CSV script.
/// Returns them through the provided channel.
async fn read_operations(
    input_path: impl AsRef<Path> + Send,
    tx: mpsc::Sender<CartOperation>,
) -> Result<(), Error> {
    let file = File::open(input_path).await?;
    let mut csv_reader = AsyncReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .create_deserializer(file);

    let mut records = csv_reader.deserialize::<CartOperation>();
    while let Some(result) = records.next().await {
        // CSV parsing errors are critical - propagate them
        let operation = result?;
        if tx.send(operation).await.is_err() {
            // Receiver dropped, exit gracefully
            break;
        }
    }
    Ok(())
}

/// Applies operations received through the channel.
/// Returns how many were applied once the channel is closed by the reader.
async fn process_operations(mut rx: mpsc::Receiver<CartOperation>, cart: CartHandle) -> usize {
    let mut applied = 0;
    while let Some(operation) = rx.recv().await {
        match Command::try_from(operation) {
            Ok(command) => {
                command.apply(&cart);
                applied += 1;
            }
            // Invalid rows are skipped, the rest of the script still runs
            Err(e) => warn!(error = %e, "skipping cart operation"),
        }
    }
    applied
}
