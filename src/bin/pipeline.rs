// src/bin/pipeline.rs
// Builds one fake profile from several public generator APIs and prints it.
// Calls run one after another; a failed call leaves its section empty.

use dotenv::dotenv;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::env;

const RANDOM_USER_URL: &str = "https://randomuser.me/api/?results=1";
const PHONE_URL: &str = "https://randommer.io/api/Phone/Generate?CountryCode=FR&Quantity=1";
const IBAN_URL: &str = "https://randommer.io/api/Finance/Iban/FR";
const CARD_URL: &str = "https://randommer.io/api/Card?type=VISA";
const FIRST_NAME_URL: &str = "https://randommer.io/api/Name?nameType=firstname&quantity=1";

// --- Upstream payloads ---

#[derive(Deserialize, Debug)]
struct RandomUserResponse {
    #[serde(default)]
    results: Vec<RandomUser>,
}

#[derive(Deserialize, Debug)]
struct RandomUser {
    gender: String,
    name: RandomUserName,
    email: String,
    picture: RandomUserPicture,
    location: RandomUserLocation,
}

#[derive(Deserialize, Debug)]
struct RandomUserName {
    first: String,
    last: String,
}

#[derive(Deserialize, Debug)]
struct RandomUserPicture {
    large: String,
}

#[derive(Deserialize, Debug)]
struct RandomUserLocation {
    street: RandomUserStreet,
    city: String,
    country: String,
    // number or string depending on the country
    postcode: Value,
}

#[derive(Deserialize, Debug)]
struct RandomUserStreet {
    number: Value,
    name: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct CardResponse {
    card_number: Value,
    cvv: Value,
    expiry_date: Value,
}

// --- Combined record ---

#[derive(Serialize, Debug, Default, PartialEq)]
struct CombinedRecord {
    user: UserInfo,
    #[serde(rename = "bankInfo")]
    bank_info: BankInfo,
    #[serde(rename = "petInfo")]
    pet_info: PetInfo,
}

#[derive(Serialize, Debug, Default, PartialEq)]
struct UserInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<NameInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<LocationInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
}

#[derive(Serialize, Debug, PartialEq)]
struct NameInfo {
    first: String,
    last: String,
}

#[derive(Serialize, Debug, PartialEq)]
struct LocationInfo {
    street: String,
    city: String,
    country: String,
    postcode: Value,
}

#[derive(Serialize, Debug, Default, PartialEq)]
struct BankInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    iban: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    card: Option<CardInfo>,
}

#[derive(Serialize, Debug, PartialEq)]
struct CardInfo {
    number: Value,
    cvv: Value,
    expiration: Value,
}

#[derive(Serialize, Debug, Default, PartialEq)]
struct PetInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl UserInfo {
    /// Fill the profile part from the first randomuser.me result, keeping any phone
    fn apply_profile(&mut self, user: RandomUser) {
        self.gender = Some(user.gender);
        self.name = Some(NameInfo {
            first: user.name.first,
            last: user.name.last,
        });
        self.email = Some(user.email);
        self.picture = Some(user.picture.large);
        self.location = Some(LocationInfo {
            street: format!(
                "{} {}",
                display_value(&user.location.street.number),
                user.location.street.name
            ),
            city: user.location.city,
            country: user.location.country,
            postcode: user.location.postcode,
        });
    }
}

impl From<CardResponse> for CardInfo {
    fn from(card: CardResponse) -> Self {
        CardInfo {
            number: card.card_number,
            cvv: card.cvv,
            expiration: card.expiry_date,
        }
    }
}

// --- Pipeline ---

/// Upstream URLs, one per step
struct Endpoints {
    random_user: String,
    phone: String,
    iban: String,
    card: String,
    first_name: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints {
            random_user: RANDOM_USER_URL.to_string(),
            phone: PHONE_URL.to_string(),
            iban: IBAN_URL.to_string(),
            card: CARD_URL.to_string(),
            first_name: FIRST_NAME_URL.to_string(),
        }
    }
}

struct Pipeline {
    client: Client,
    randommer_key: Option<String>,
    endpoints: Endpoints,
}

impl Pipeline {
    fn new(randommer_key: Option<String>, endpoints: Endpoints) -> Self {
        Self {
            client: Client::new(),
            randommer_key,
            endpoints,
        }
    }

    /// GET `url` and decode the body; any failure is logged and yields None
    async fn fetch<T: DeserializeOwned>(&self, url: &str, randommer: bool) -> Option<T> {
        let mut request = self.client.get(url);
        if randommer {
            if let Some(key) = &self.randommer_key {
                request = request.header("X-Api-Key", key);
            }
        }

        let result = async {
            request
                .send()
                .await?
                .error_for_status()?
                .json::<T>()
                .await
        }
        .await;

        match result {
            Ok(body) => Some(body),
            Err(e) => {
                log::error!("Call to {} failed: {}", url, e);
                None
            }
        }
    }

    async fn run(&self) -> CombinedRecord {
        log::info!("Starting");
        let mut record = CombinedRecord::default();

        log::info!("Fetching user");
        if let Some(user) = self
            .fetch::<RandomUserResponse>(&self.endpoints.random_user, false)
            .await
            .and_then(|r| r.results.into_iter().next())
        {
            record.user.apply_profile(user);
        }

        log::info!("Fetching phone number");
        record.user.phone = self
            .fetch::<Vec<String>>(&self.endpoints.phone, true)
            .await
            .and_then(|phones| phones.into_iter().next());

        log::info!("Fetching IBAN");
        record.bank_info.iban = self.fetch::<String>(&self.endpoints.iban, true).await;

        log::info!("Fetching card");
        record.bank_info.card = self
            .fetch::<CardResponse>(&self.endpoints.card, true)
            .await
            .map(CardInfo::from);

        log::info!("Fetching pet name");
        record.pet_info.name = self
            .fetch::<Vec<String>>(&self.endpoints.first_name, true)
            .await
            .and_then(|names| names.into_iter().next());

        log::info!("Done");
        record
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let randommer_key = env::var("RANDOMMER_API_KEY").ok();
    if randommer_key.is_none() {
        log::warn!("RANDOMMER_API_KEY not set - randommer.io calls will likely be rejected");
    }

    let record = Pipeline::new(randommer_key, Endpoints::default()).run().await;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
