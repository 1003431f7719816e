use std::path::{Path, PathBuf};

use pdconfig::handler::ResourceHandler;
use pdconfig::resource::{ResourceConfig, ResourceModel};
use pdconfig::schema::ResourceSchema;
use pdconfig::terraform::state::{StateFile, StateStore, StoredResource};
use pdconfig::version::ProductVersion;
use pdconfig::{ConfigClient, HandlerError, PdError, Plan, ProviderConfig, output, resources};
use serde_json::Value;

use super::args::{Cli, Command, ProviderArgs};

pub async fn run(cli: Cli) -> Result<(), PdError> {
    let store = StateStore::new(state_path(cli.state)?);

    match cli.command {
        Command::Resources => println!("{}", output::resources_table(resources::all())),
        Command::Schema { resource } => {
            println!("{}", output::schema_tree(resources::get_resource(&resource)?));
        }
        Command::Plan(args) => {
            let version = cli.provider.product_version()?;
            let state = store.load()?;
            for planned in plan_documents(&args.file, &state, version)? {
                println!("{}", output::plan_summary(planned.schema, &planned.plan));
            }
        }
        Command::Apply(args) => apply(&cli.provider, &store, &args.file).await?,
        Command::Refresh => refresh(&cli.provider, &store).await?,
        Command::Destroy { address } => destroy(&cli.provider, &store, &address).await?,
        Command::Import { resource, id } => {
            let schema = resources::get_resource(&resource)?;
            let client = client(&cli.provider.config()?)?;
            let imported = ResourceHandler::new(schema, &client)
                .import(id.as_deref())
                .await?;

            let mut state = store.load()?;
            state.put(StoredResource::from_model(schema, &imported));
            store.save(&state)?;
            tracing::info!(address = %imported.address(schema), "imported");
            println!("{}", output::model_table(schema, &imported));
        }
        Command::Read { resource, id } => {
            let schema = resources::get_resource(&resource)?;
            let client = client(&cli.provider.config()?)?;
            let found = ResourceHandler::new(schema, &client)
                .read_data_source(id.as_deref())
                .await?;
            println!("{}", output::model_table(schema, &found));
        }
        Command::Show { address } => {
            let state = store.load()?;
            match address {
                None => println!("{}", output::state_table(&state)),
                Some(address) => {
                    let (schema, model) = tracked(&state, &address)?;
                    println!("{}", output::model_table(schema, &model));
                }
            }
        }
    }

    Ok(())
}

struct PlannedResource {
    schema: &'static ResourceSchema,
    address: String,
    prior: Option<ResourceModel>,
    plan: Plan,
}

fn state_path(flag: Option<PathBuf>) -> Result<PathBuf, PdError> {
    flag.or_else(StateStore::default_path).ok_or_else(|| {
        PdError::Config("cannot determine a state file location, pass --state".to_string())
    })
}

fn client(config: &ProviderConfig) -> Result<ConfigClient, PdError> {
    tracing::debug!(?config, "provider configuration");
    ConfigClient::new(config).map_err(|err| HandlerError::from(err).into())
}

/// Accepts a single document or an array of documents.
fn load_documents(path: &Path) -> Result<Vec<ResourceConfig>, PdError> {
    let contents = std::fs::read_to_string(path)?;
    let documents = match serde_json::from_str::<Value>(&contents)? {
        Value::Array(items) => items,
        other => vec![other],
    };
    documents
        .into_iter()
        .map(|document| serde_json::from_value::<ResourceConfig>(document).map_err(PdError::from))
        .collect()
}

/// Plans every document before anything is sent, so one invalid document
/// stops the whole run.
fn plan_documents(
    path: &Path,
    state: &StateFile,
    version: ProductVersion,
) -> Result<Vec<PlannedResource>, PdError> {
    let documents = load_documents(path)?;
    tracing::info!(count = documents.len(), "loaded configuration documents");

    documents
        .into_iter()
        .map(|document| -> Result<PlannedResource, PdError> {
            let schema = resources::get_resource(&document.resource)?;
            let config = ResourceModel::from_config(schema, &document.values)?;
            let address = config.address(schema);
            let prior = state
                .get(&address)
                .cloned()
                .map(|stored| stored.into_model(schema))
                .transpose()?;
            let plan = pdconfig::plan(schema, config, prior.as_ref(), version)?;
            Ok(PlannedResource {
                schema,
                address,
                prior,
                plan,
            })
        })
        .collect()
}

async fn apply(provider: &ProviderArgs, store: &StateStore, path: &Path) -> Result<(), PdError> {
    let config = provider.config()?;
    let client = client(&config)?;
    let mut state = store.load()?;
    let planned = plan_documents(path, &state, config.product_version)?;

    for resource in planned {
        println!("{}", output::plan_summary(resource.schema, &resource.plan));
        let applied = ResourceHandler::new(resource.schema, &client)
            .apply(&resource.plan, resource.prior.as_ref())
            .await?;

        state.remove(&resource.address);
        state.put(StoredResource::from_model(resource.schema, &applied));
        store.save(&state)?;
    }
    Ok(())
}

async fn refresh(provider: &ProviderArgs, store: &StateStore) -> Result<(), PdError> {
    let client = client(&provider.config()?)?;
    let mut state = store.load()?;
    let addresses: Vec<String> = state.resources.keys().cloned().collect();

    for address in addresses {
        let (schema, model) = tracked(&state, &address)?;
        match ResourceHandler::new(schema, &client).read(&model).await? {
            Some(current) => state.put(StoredResource::from_model(schema, &current)),
            None => {
                state.remove(&address);
            }
        }
    }

    store.save(&state)?;
    tracing::info!(count = state.resources.len(), "refresh complete");
    Ok(())
}

async fn destroy(provider: &ProviderArgs, store: &StateStore, address: &str) -> Result<(), PdError> {
    let client = client(&provider.config()?)?;
    let mut state = store.load()?;
    let (schema, model) = tracked(&state, address)?;

    ResourceHandler::new(schema, &client).delete(&model).await?;
    state.remove(address);
    store.save(&state)?;
    Ok(())
}

fn tracked(
    state: &StateFile,
    address: &str,
) -> Result<(&'static ResourceSchema, ResourceModel), PdError> {
    let stored = state
        .get(address)
        .ok_or_else(|| PdError::NotTracked(address.to_string()))?;
    let schema = resources::get_resource(&stored.resource)?;
    Ok((schema, stored.clone().into_model(schema)?))
}
