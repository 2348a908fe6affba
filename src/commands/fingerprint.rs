use customerhub_core::config::AppConfig;
use customerhub_registration::extract_device_info;

pub fn run(config: AppConfig, user_agent: Option<String>) {
    let user_agent = user_agent.unwrap_or(config.client.user_agent);
    let info = extract_device_info(&user_agent);

    println!("Browser:    {}", info.browser_label());
    println!("Device:     {}", info.device_type);
    println!("OS:         {}", info.os);
    println!("User agent: {}", info.raw_user_agent);
}
